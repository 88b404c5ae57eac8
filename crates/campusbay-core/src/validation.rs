//! Validation utilities.

use crate::{CampusBayError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CampusBayError` on failure.
    fn validate_request(&self) -> Result<(), CampusBayError> {
        self.validate().map_err(validation_errors_to_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    // HashMap iteration order is unstable; keep messages deterministic.
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `CampusBayError`.
#[must_use]
pub fn validation_errors_to_error(errors: ValidationErrors) -> CampusBayError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    CampusBayError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::{ValidateEmail, ValidationError};

    /// Longest accepted image reference.
    pub const MAX_IMAGE_URL_LEN: usize = 2048;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
        }
        Ok(())
    }

    /// Validates an item title: 3-200 characters once trimmed.
    pub fn title_length(value: &str) -> Result<(), ValidationError> {
        trimmed_length(value, 3, 200, "Title must be 3-200 characters")
    }

    /// Validates a display name: 2-100 characters once trimmed.
    pub fn name_length(value: &str) -> Result<(), ValidationError> {
        trimmed_length(value, 2, 100, "Name must be 2-100 characters")
    }

    /// Validates an email address after trimming surrounding whitespace.
    pub fn email_address(value: &str) -> Result<(), ValidationError> {
        if value.trim().validate_email() {
            Ok(())
        } else {
            Err(ValidationError::new("email").with_message("Invalid email address".into()))
        }
    }

    fn trimmed_length(
        value: &str,
        min: usize,
        max: usize,
        message: &'static str,
    ) -> Result<(), ValidationError> {
        let len = value.trim().chars().count();
        if len < min || len > max {
            return Err(ValidationError::new("length").with_message(message.into()));
        }
        Ok(())
    }

    /// Validates that a password has at least 8 characters including an
    /// uppercase letter, a lowercase letter and a digit.
    pub fn password_complexity(password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < 8 {
            return Err(ValidationError::new("password_too_short")
                .with_message("Password must be at least 8 characters".into()));
        }

        let has_uppercase = password.chars().any(char::is_uppercase);
        let has_lowercase = password.chars().any(char::is_lowercase);
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        if !(has_uppercase && has_lowercase && has_digit) {
            return Err(ValidationError::new("password_complexity").with_message(
                "Password must contain at least one uppercase letter, one lowercase letter, and one number"
                    .into(),
            ));
        }

        Ok(())
    }

    /// Validates a list of image references.
    ///
    /// Accepts absolute http(s) URLs and server-relative paths such as
    /// `/uploads/books.png`.
    pub fn image_urls(urls: &[String]) -> Result<(), ValidationError> {
        for url in urls {
            let url = url.trim();
            let well_formed = url.starts_with("https://")
                || url.starts_with("http://")
                || (url.starts_with('/') && !url.starts_with("//"));
            if !well_formed || url.len() > MAX_IMAGE_URL_LEN {
                return Err(ValidationError::new("image_url")
                    .with_message("Each image must be an http(s) URL or an absolute path".into()));
            }
        }
        Ok(())
    }
}
