//! Input validation helpers
//!
//! Centralized text length constants and validation helpers shared by the
//! CRUD handlers. Structural checks live on the payload structs via
//! `validator` derive; the helpers here cover what the derive cannot express.

use crate::utils::AppError;
use validator::Validate;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: item, attribute, value labels
pub const MAX_NAME_LEN: usize = 200;

/// Attribute machine names, raw value tokens and SKUs (feed into SKU derivation)
pub const MAX_TOKEN_LEN: usize = 64;

/// Run derive-based validation and fold field errors into an [`AppError`]
pub fn check(payload: &impl Validate) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut err = AppError::validation("Validation failed");
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            err = err.with_detail(field.to_string(), messages.join(", "));
        }
        err
    })
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let long = "x".repeat(MAX_TOKEN_LEN + 1);
        let err = validate_required_text(&long, "sku", MAX_TOKEN_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn check_folds_field_errors_into_details() {
        use validator::Validate;

        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 1, max = 10))]
            name: String,
        }

        let err = check(&Payload {
            name: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.unwrap().contains_key("name"));
    }
}
