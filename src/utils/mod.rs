//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`ApiResponse`] - application error and response envelope
//! - [`logger`] - tracing setup
//! - [`validation`] - input validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{ApiResponse, AppError, ErrorCode};
pub use error::{ok, ok_with_message};
pub use result::AppResult;
