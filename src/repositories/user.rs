use crate::{
    client::ApiRequest,
    error::Result,
    middleware_layer::auth::fetch_protected,
    models::user::{Profile, User, UserForm},
    state::Portal,
};

fn favorite_path(theory_id: i64) -> String {
    format!("/utenti/me/teorie-preferite/{}", theory_id)
}

/// Fetches the current user's profile, favorites included.
pub async fn me(portal: &Portal) -> Result<Profile> {
    fetch_protected(portal, ApiRequest::get("/utenti/me"))
        .await?
        .parse()
}

/// Adds a theory to the current user's favorites.
pub async fn add_favorite(portal: &Portal, theory_id: i64) -> Result<()> {
    fetch_protected(portal, ApiRequest::post(favorite_path(theory_id))).await?;
    Ok(())
}

/// Removes a theory from the current user's favorites.
pub async fn remove_favorite(portal: &Portal, theory_id: i64) -> Result<()> {
    fetch_protected(portal, ApiRequest::delete(favorite_path(theory_id))).await?;
    Ok(())
}

/// Lists all users.
pub async fn list_all(portal: &Portal) -> Result<Vec<User>> {
    fetch_protected(portal, ApiRequest::get("/utenti"))
        .await?
        .listing()
}

/// Creates a new user.
pub async fn create(portal: &Portal, form: &UserForm) -> Result<()> {
    let request = ApiRequest::post("/utenti").json(form)?;
    fetch_protected(portal, request).await?;
    Ok(())
}

/// Updates the user with the given ID.
pub async fn update(portal: &Portal, user_id: i64, form: &UserForm) -> Result<()> {
    let request = ApiRequest::put(format!("/utenti/{}", user_id)).json(form)?;
    fetch_protected(portal, request).await?;
    Ok(())
}

/// Deletes the user with the given ID.
pub async fn delete(portal: &Portal, user_id: i64) -> Result<()> {
    fetch_protected(portal, ApiRequest::delete(format!("/utenti/{}", user_id))).await?;
    Ok(())
}
