use crate::{
    error::Result,
    models::theory::Theory,
    repositories::user as user_repo,
    resource::ResourceState,
    state::Portal,
};

/// Adds or removes a theory from the current user's favorites.
///
/// # Arguments
///
/// * `portal` - The portal context.
/// * `theory_id` - The theory to toggle.
/// * `currently_favorite` - The flag as the screen shows it now.
/// * `confirm` - Asked before a removal; declining sends nothing.
///
/// # Returns
///
/// A `Result` containing the new favorite flag.
pub async fn toggle<F>(
    portal: &Portal,
    theory_id: i64,
    currently_favorite: bool,
    confirm: F,
) -> Result<bool>
where
    F: FnOnce() -> bool,
{
    if currently_favorite {
        if !confirm() {
            tracing::debug!("Removal of favorite {} cancelled", theory_id);
            return Ok(true);
        }
        user_repo::remove_favorite(portal, theory_id).await?;
        tracing::info!("✅ Theory {} removed from favorites", theory_id);
        Ok(false)
    } else {
        user_repo::add_favorite(portal, theory_id).await?;
        tracing::info!("✅ Theory {} added to favorites", theory_id);
        Ok(true)
    }
}

/// The "my theories" screen.
#[derive(Debug, Default)]
pub struct FavoriteList {
    pub favorites: ResourceState<Vec<Theory>>,
}

impl FavoriteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the favorites from the current user's profile.
    pub async fn load(&mut self, portal: &Portal) {
        self.favorites = ResourceState::Loading;
        let result = user_repo::me(portal).await.map(|profile| profile.favorites);
        self.favorites = ResourceState::settle(result);
    }

    /// Removes one favorite after confirmation and drops it from the local
    /// list without refetching.
    ///
    /// Returns `true` when the theory was removed.
    pub async fn remove<F>(&mut self, portal: &Portal, theory_id: i64, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        let still_favorite = toggle(portal, theory_id, true, confirm).await?;
        if still_favorite {
            return Ok(false);
        }

        if let Some(items) = self.favorites.ready_mut() {
            items.retain(|t| t.id != theory_id);
        }
        Ok(true)
    }
}
