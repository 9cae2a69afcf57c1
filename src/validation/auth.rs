use garde::Validate;

use crate::error::{ApiError, Result};

/// The registration fields checked before anything is sent.
#[derive(Debug, Validate)]
pub struct SignupForm {
    #[garde(length(chars, min = 5, max = 30))]
    pub username: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(chars, min = 8))]
    pub password: String,
}

/// Validates a login attempt.
///
/// # Arguments
///
/// * `identifier` - The username or email.
/// * `password` - The password.
///
/// # Returns
///
/// A `Result<()>` indicating whether both fields were filled in.
pub fn validate_login(identifier: &str, password: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(ApiError::Validation(
            "Username or email is required".to_string(),
        ));
    }

    if password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }

    Ok(())
}

/// Validates a registration.
///
/// The confirmation check runs first so a mismatch is reported even when
/// other fields are also wrong.
///
/// # Returns
///
/// A `Result<()>` indicating whether the registration may be submitted.
pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<()> {
    if password != confirm_password {
        return Err(ApiError::Validation("Passwords do not match".to_string()));
    }

    let form = SignupForm {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    form.validate()
        .map_err(|report| ApiError::Validation(report.to_string().trim().to_string()))
}
