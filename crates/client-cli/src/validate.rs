//! Client-side form validation.
//!
//! Runs before any network call; a form with violations never reaches the
//! HTTP layer. Messages are per-field and shown next to the offending input.

use std::fmt;

/// One field violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collects violations across a form, so the user sees all of them at once
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: &'static str, result: Result<(), String>) -> &mut Self {
        if let Err(message) = result {
            self.errors.push(FieldError { field, message });
        }
        self
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validate that a required field is non-empty
pub fn validate_required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    Ok(())
}

/// Validate an email address: one '@' with a dotted domain after it
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

/// Validate the password rule: at least 6 characters, with at least one
/// upper-case letter, one lower-case letter, and one non-alphanumeric
/// character.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must include an upper-case letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must include a lower-case letter".to_string());
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err("Password must include a special character".to_string());
    }
    Ok(())
}

/// Validate an image/logo URL
pub fn validate_image_url(url: &str, label: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("{label} must be an http(s) URL"));
    }
    Ok(())
}

/// Validate an asset quantity: at least one unit
pub fn validate_quantity(quantity: u32) -> Result<(), String> {
    if quantity < 1 {
        return Err("Quantity must be at least 1".to_string());
    }
    Ok(())
}

/// Validate a date-of-birth field (YYYY-MM-DD)
pub fn validate_date(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(format!("{label} must be a date in YYYY-MM-DD form"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Laptop", "Name").is_ok());
        assert!(validate_required("", "Name").is_err());
        assert!(validate_required("   ", "Name").is_err());
    }

    #[test]
    fn test_validate_password_accepts_compliant() {
        assert!(validate_password("Abcdef1!").is_ok());
        assert!(validate_password("Xy.z12").is_ok());
    }

    #[test]
    fn test_validate_password_rejects_short() {
        assert!(validate_password("abcdef").is_err());
        assert!(validate_password("Ab1!").is_err());
    }

    #[test]
    fn test_validate_password_rejects_missing_classes() {
        // no uppercase, no special
        assert!(validate_password("abcdefgh").is_err());
        // no lowercase
        assert!(validate_password("ABCDEF1!").is_err());
        // no special character
        assert!(validate_password("Abcdefg1").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("amina@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("amina").is_err());
        assert!(validate_email("amina@example").is_err());
        assert!(validate_email("am ina@example.com").is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://img.example/x.png", "Image").is_ok());
        assert!(validate_image_url("", "Image").is_err());
        assert!(validate_image_url("ftp://img.example/x.png", "Image").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(5).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("1994-05-12", "Date of birth").is_ok());
        assert!(validate_date("", "Date of birth").is_err());
        assert!(validate_date("12/05/1994", "Date of birth").is_err());
    }

    #[test]
    fn test_validator_collects_all_errors() {
        let mut validator = Validator::new();
        validator
            .check("name", validate_required("", "Name"))
            .check("email", validate_email("bad"))
            .check("password", validate_password("Abcdef1!"));

        let errors = validator.finish().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "email");
    }

    #[test]
    fn test_validator_passes_clean_form() {
        let mut validator = Validator::new();
        validator
            .check("name", validate_required("Laptop", "Name"))
            .check("quantity", validate_quantity(5));
        assert!(validator.finish().is_ok());
    }
}
