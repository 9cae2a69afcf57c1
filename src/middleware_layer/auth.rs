use crate::{
    client::{ApiRequest, Payload},
    error::{ApiError, Result},
    navigation::{Route, Signal},
    services::auth as auth_service,
    state::Portal,
};

/// Sends a request that requires a logged-in user.
///
/// # Arguments
///
/// * `portal` - The portal context.
/// * `request` - The request to send; it is always sent with the token.
///
/// # Returns
///
/// The response payload. Fails with `MustLogIn` without touching the network
/// when there is no token, with `AuthExpired` after a 401/403 (the session is
/// cleared and the front end sent to login), and with `SessionChanged` when
/// the session was replaced while the request was in flight.
pub async fn fetch_protected(portal: &Portal, request: ApiRequest) -> Result<Payload> {
    tracing::debug!("🔐 Checking session for {} {}", request.method, request.path);

    let generation = portal.session.generation();
    if portal.session.token().is_none() {
        tracing::warn!("❌ No token for {} {}", request.method, request.path);
        portal.navigator.emit(Signal::MustLogIn);
        auth_service::logout(portal);
        return Err(ApiError::MustLogIn);
    }

    let result = portal.client.request(request.with_auth()).await;

    match result {
        Err(e) if e.is_unauthorized() => {
            if portal.session.clear_if(generation) {
                tracing::warn!("❌ Token rejected, session dropped: {}", e);
                portal.navigator.emit(Signal::SessionExpired);
                portal.navigator.redirect(Route::Login);
            } else {
                tracing::debug!("Token rejected for a session that is already gone");
            }
            Err(ApiError::AuthExpired)
        }
        Err(e) => Err(e),
        Ok(_) if portal.session.generation() != generation => {
            tracing::debug!("Session changed mid-request, dropping result");
            Err(ApiError::SessionChanged)
        }
        Ok(payload) => Ok(payload),
    }
}
