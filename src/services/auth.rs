use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    client::ApiRequest,
    error::{ApiError, Result},
    models::{
        session::{BearerToken, Session},
        user::Role,
    },
    navigation::Route,
    state::Portal,
    validation::auth::{validate_login, validate_signup},
};

/// Shown when a refused login carries no message.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
/// Shown when a refused registration carries no message.
pub const REGISTRATION_FAILED: &str = "Registration failed";
/// Shown when a successful registration carries no message.
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful! You can now log in.";

/// The request payload for login.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SigninRequest<'a> {
    username_or_email: &'a str,
    password: &'a str,
}

/// The request payload for registration.
#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    roles: [Role; 1],
}

/// The response payload of a successful login.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JwtResponse {
    access_token: String,
    #[serde(default)]
    roles: Vec<String>,
}

/// The result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    /// Where the user was sent.
    pub landing: Route,
}

/// The result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    /// The confirmation shown to the user.
    pub message: String,
    /// How long until the redirect to login fires.
    pub redirect_after: Duration,
}

/// Logs a user in.
///
/// # Arguments
///
/// * `portal` - The portal context.
/// * `identifier` - The username or email.
/// * `password` - The password.
///
/// # Returns
///
/// A `Result` containing the new session and its landing route. On failure
/// nothing is stored and no redirect is signalled.
pub async fn login(portal: &Portal, identifier: &str, password: &str) -> Result<LoginOutcome> {
    tracing::info!("🔐 Login attempt for: {}", identifier);
    validate_login(identifier, password)?;

    let request = ApiRequest::post("/auth/signin").json(&SigninRequest {
        username_or_email: identifier,
        password,
    })?;

    let payload = portal.client.request(request).await.map_err(|e| match e {
        ApiError::Http { message, .. } => {
            ApiError::Authentication(message.unwrap_or_else(|| INVALID_CREDENTIALS.to_string()))
        }
        ApiError::NotFound(message) => ApiError::Authentication(message),
        other => other,
    })?;

    let jwt: JwtResponse = payload.parse()?;
    portal
        .session
        .set(BearerToken::new(jwt.access_token), jwt.roles);

    let session = portal.session.get();
    let landing = session.landing_route();
    tracing::info!("✅ User logged in: {} -> {}", identifier, landing.path());
    portal.navigator.redirect(landing.clone());

    Ok(LoginOutcome { session, landing })
}

/// Registers a new user.
///
/// Validation happens locally; nothing is sent when it fails.
///
/// # Returns
///
/// A `Result` containing the confirmation message and the redirect delay.
pub async fn register(
    portal: &Portal,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Registered> {
    tracing::info!("📝 Register attempt for: {}", username);
    validate_signup(username, email, password, confirm_password)?;
    tracing::debug!("✅ Validations passed for: {}", username);

    let request = ApiRequest::post("/auth/signup").json(&SignupRequest {
        username,
        email,
        password,
        roles: [Role::User],
    })?;

    let payload = portal.client.request(request).await.map_err(|e| match e {
        ApiError::Http { status, message } => ApiError::Http {
            status,
            message: Some(message.unwrap_or_else(|| REGISTRATION_FAILED.to_string())),
        },
        other => other,
    })?;

    let message = payload
        .message()
        .unwrap_or_else(|| REGISTRATION_SUCCEEDED.to_string());
    let redirect_after = portal.config.register_redirect_delay;

    tracing::info!("✅ User registered: {}", username);
    portal.navigator.redirect_after(Route::Login, redirect_after);

    Ok(Registered {
        message,
        redirect_after,
    })
}

/// Logs the current user out and sends the front end to login.
///
/// Safe to call when nobody is logged in.
pub fn logout(portal: &Portal) {
    portal.session.clear();
    tracing::info!("👋 Logged out");
    portal.navigator.redirect(Route::Login);
}
