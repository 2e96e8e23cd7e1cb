//! Validation helpers for DTOs.

use validator::{ValidationError, ValidationErrors};

/// Rejects values that are empty or made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Record an error for `field` when it is absent or blank.
pub fn require_text(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    match value {
        None => {
            let mut err = ValidationError::new("required");
            err.message = Some(format!("`{field}` is required").into());
            errors.add(field, err);
        }
        Some(value) => check_text(errors, field, Some(value)),
    }
}

/// Record an error for `field` when it is present but blank.
pub fn check_text(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    if let Some(Err(err)) = value.map(validate_not_blank) {
        errors.add(field, err);
    }
}
