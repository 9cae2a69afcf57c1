use crate::{
    error::{ApiError, Result},
    models::{theory::Theory, user::Profile},
    repositories::{theory as theory_repo, user as user_repo},
    resource::ResourceState,
    services::favorites,
    state::Portal,
};

/// The public theory listing, filtered by keyword.
#[derive(Debug, Default)]
pub struct TheoryCatalog {
    pub theories: ResourceState<Vec<Theory>>,
}

impl TheoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, portal: &Portal, keyword: &str) {
        self.theories = ResourceState::Loading;
        let result = theory_repo::search(&portal.client, keyword, false).await;
        self.theories = ResourceState::settle(result);
    }
}

/// A single theory with the visitor's favorite flag.
#[derive(Debug, Default)]
pub struct TheoryDetail {
    pub theory: ResourceState<Theory>,
    pub is_favorite: bool,
}

impl TheoryDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the theory and, for logged-in visitors, whether it is a favorite.
    ///
    /// Anonymous visitors get the theory with the flag off. A failed profile
    /// fetch fails the whole screen, like a failed theory fetch does.
    pub async fn load(&mut self, portal: &Portal, theory_id: i64) {
        self.theory = ResourceState::Loading;
        self.is_favorite = false;

        let result = Self::fetch(portal, theory_id).await;
        match result {
            Ok((theory, is_favorite)) => {
                self.theory = ResourceState::Ready(theory);
                self.is_favorite = is_favorite;
            }
            Err(e) => self.theory = ResourceState::settle(Err(e)),
        }
    }

    async fn fetch(portal: &Portal, theory_id: i64) -> Result<(Theory, bool)> {
        let theory = theory_repo::find_by_id(&portal.client, theory_id).await?;
        if !portal.session.get().is_authenticated() {
            return Ok((theory, false));
        }

        let profile: Profile = user_repo::me(portal).await?;
        let is_favorite = profile.is_favorite(theory.id);
        Ok((theory, is_favorite))
    }

    /// Flips the favorite flag of the loaded theory.
    ///
    /// Fails with `Validation` when no theory is loaded.
    pub async fn toggle_favorite<F>(&mut self, portal: &Portal, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        let Some(theory_id) = self.theory.ready().map(|t| t.id) else {
            return Err(ApiError::Validation("No theory loaded".to_string()));
        };

        self.is_favorite = favorites::toggle(portal, theory_id, self.is_favorite, confirm).await?;
        Ok(self.is_favorite)
    }
}
