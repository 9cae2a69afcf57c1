use crate::{
    models::user::Profile,
    repositories::user as user_repo,
    resource::ResourceState,
    state::Portal,
};

/// The profile card on the user dashboard.
#[derive(Debug, Default)]
pub struct ProfileView {
    pub profile: ResourceState<Profile>,
}

impl ProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, portal: &Portal) {
        self.profile = ResourceState::Loading;
        self.profile = ResourceState::settle(user_repo::me(portal).await);
    }
}
