use crate::{
    client::{ApiClient, ApiRequest},
    error::{ApiError, Result},
    middleware_layer::auth::fetch_protected,
    models::theory::{Theory, TheoryForm},
    state::Portal,
};

/// Searches theories by keyword. An empty keyword lists everything the
/// backend's first page holds.
///
/// # Arguments
///
/// * `client` - The API client.
/// * `keyword` - The search keyword.
/// * `with_auth` - Whether to attach the token if one is present.
///
/// # Returns
///
/// A `Result` containing the matching theories.
pub async fn search(client: &ApiClient, keyword: &str, with_auth: bool) -> Result<Vec<Theory>> {
    let mut request = ApiRequest::get("/theories").query("keyword", keyword);
    if with_auth {
        request = request.with_auth();
    }

    client.request(request).await?.listing()
}

/// Finds a theory by its ID.
pub async fn find_by_id(client: &ApiClient, theory_id: i64) -> Result<Theory> {
    let payload = client
        .request(ApiRequest::get(format!("/theories/{}", theory_id)))
        .await
        .map_err(|e| match e {
            ApiError::NotFound(_) => ApiError::NotFound("Theory not found".to_string()),
            other => other,
        })?;

    payload.parse()
}

/// Lists every theory for the admin screen.
pub async fn list_all(portal: &Portal) -> Result<Vec<Theory>> {
    fetch_protected(portal, ApiRequest::get("/theories"))
        .await?
        .listing()
}

/// Creates a new theory.
pub async fn create(portal: &Portal, form: &TheoryForm) -> Result<()> {
    let request = ApiRequest::post("/theories").json(form)?;
    fetch_protected(portal, request).await?;
    Ok(())
}

/// Replaces the theory with the given ID.
pub async fn update(portal: &Portal, theory_id: i64, form: &TheoryForm) -> Result<()> {
    let request = ApiRequest::put(format!("/theories/{}", theory_id)).json(form)?;
    fetch_protected(portal, request).await?;
    Ok(())
}

/// Deletes the theory with the given ID.
pub async fn delete(portal: &Portal, theory_id: i64) -> Result<()> {
    fetch_protected(portal, ApiRequest::delete(format!("/theories/{}", theory_id))).await?;
    Ok(())
}
