//! Unified error handling
//!
//! Structured error codes plus the application error type returned by every
//! handler. Codes are grouped by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Unified error code enum
///
/// Represented as u16 for efficient serialization and cross-language
/// compatibility with the admin frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 6xxx: Catalog ====================
    /// Catalog item not found
    ItemNotFound = 6001,
    /// Item is not in configurable mode
    ItemNotConfigurable = 6002,
    /// Attribute not found
    AttributeNotFound = 6003,
    /// Attribute name already exists on this item
    AttributeNameExists = 6004,
    /// Item has no variation attributes
    NoVariationAttributes = 6005,
    /// Variant not found
    VariantNotFound = 6006,
    /// SKU already exists
    SkuExists = 6007,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9001,
    /// Internal server error
    InternalError = 9002,
    /// Atomic unit left partial state (defect if ever observed)
    ConsistencyFailure = 9003,
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            1001 => Ok(Self::NotAuthenticated),
            2001 => Ok(Self::PermissionDenied),
            6001 => Ok(Self::ItemNotFound),
            6002 => Ok(Self::ItemNotConfigurable),
            6003 => Ok(Self::AttributeNotFound),
            6004 => Ok(Self::AttributeNameExists),
            6005 => Ok(Self::NoVariationAttributes),
            6006 => Ok(Self::VariantNotFound),
            6007 => Ok(Self::SkuExists),
            9001 => Ok(Self::DatabaseError),
            9002 => Ok(Self::InternalError),
            9003 => Ok(Self::ConsistencyFailure),
            other => Err(format!("unknown error code: {other}")),
        }
    }
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::NotAuthenticated => "Authentication required",
            Self::PermissionDenied => "Permission denied",
            Self::ItemNotFound => "Catalog item not found",
            Self::ItemNotConfigurable => "Item is not configurable",
            Self::AttributeNotFound => "Attribute not found",
            Self::AttributeNameExists => "Attribute name already exists for this item",
            Self::NoVariationAttributes => "No variation attributes found for this item",
            Self::VariantNotFound => "Variant not found",
            Self::SkuExists => "SKU already exists",
            Self::DatabaseError => "Database error",
            Self::InternalError => "Internal server error",
            Self::ConsistencyFailure => "Consistency failure",
        }
    }

    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found (a mode mismatch counts as not-found: the item
            // referenced as configurable does not exist)
            Self::NotFound
            | Self::ItemNotFound
            | Self::ItemNotConfigurable
            | Self::AttributeNotFound
            | Self::VariantNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::AttributeNameExists | Self::SkuExists => {
                StatusCode::CONFLICT
            }

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidRequest | Self::NoVariationAttributes => {
                StatusCode::BAD_REQUEST
            }

            // 500 Internal Server Error
            Self::Unknown | Self::DatabaseError | Self::InternalError | Self::ConsistencyFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }
}

/// API response envelope
///
/// ```json
/// { "code": 0, "message": "Success", "data": { ... } }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying data
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success,
            message: ErrorCode::Success.message().to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Successful response with a custom message
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: ErrorCode::Success,
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.http_status().is_server_error() {
            tracing::error!(code = ?self.code, error = %self.message, "request failed");
        }

        let status = self.code.http_status();
        let body = ApiResponse::<()> {
            code: self.code,
            message: self.message,
            data: None,
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
