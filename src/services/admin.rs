use garde::Validate;

use crate::{
    error::{ApiError, Result},
    models::{
        theory::{Theory, TheoryForm},
        user::{User, UserForm},
    },
    repositories::{theory as theory_repo, user as user_repo},
    resource::ResourceState,
    state::Portal,
};

fn check<T: Validate<Context = ()>>(form: &T) -> Result<()> {
    form.validate()
        .map_err(|report| ApiError::Validation(report.to_string().trim().to_string()))
}

/// The admin theory screen.
///
/// A list response in an unknown envelope is shown as an empty list and
/// logged, rather than failing the screen.
#[derive(Debug, Default)]
pub struct TheoryManagement {
    pub theories: ResourceState<Vec<Theory>>,
}

impl TheoryManagement {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reload(&mut self, portal: &Portal) {
        self.theories = ResourceState::Loading;
        let result = match theory_repo::list_all(portal).await {
            Err(ApiError::UnexpectedShape(detail)) => {
                tracing::error!("❌ Theory list in unknown format, showing none: {}", detail);
                Ok(Vec::new())
            }
            other => other,
        };
        self.theories = ResourceState::settle(result);
    }

    /// Creates (`editing == None`) or updates a theory, then reloads the list.
    pub async fn save(&mut self, portal: &Portal, form: &TheoryForm, editing: Option<i64>) -> Result<()> {
        check(form)?;

        match editing {
            Some(theory_id) => {
                theory_repo::update(portal, theory_id, form).await?;
                tracing::info!("✅ Theory {} updated", theory_id);
            }
            None => {
                theory_repo::create(portal, form).await?;
                tracing::info!("✅ Theory created: {}", form.title);
            }
        }

        self.reload(portal).await;
        Ok(())
    }

    /// Deletes a theory after confirmation, then reloads the list.
    ///
    /// Returns `false` without contacting the backend when not confirmed.
    pub async fn delete<F>(&mut self, portal: &Portal, theory_id: i64, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(false);
        }

        theory_repo::delete(portal, theory_id).await?;
        tracing::info!("🗑️ Theory {} deleted", theory_id);

        self.reload(portal).await;
        Ok(true)
    }
}

/// The admin user screen.
///
/// Unlike the theory screen, an unknown list envelope fails the screen.
#[derive(Debug, Default)]
pub struct UserManagement {
    pub users: ResourceState<Vec<User>>,
}

impl UserManagement {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reload(&mut self, portal: &Portal) {
        self.users = ResourceState::Loading;
        self.users = ResourceState::settle(user_repo::list_all(portal).await);
    }

    /// Creates (`editing == None`) or updates a user, then reloads the list.
    ///
    /// A new user needs a password; on edit a blank password is dropped so
    /// the current one is kept.
    pub async fn save(&mut self, portal: &Portal, form: &UserForm, editing: Option<i64>) -> Result<()> {
        check(form)?;

        let mut form = form.clone();
        if form.password.as_deref().is_some_and(str::is_empty) {
            form.password = None;
        }

        match editing {
            Some(user_id) => {
                user_repo::update(portal, user_id, &form).await?;
                tracing::info!("✅ User {} updated", user_id);
            }
            None => {
                if form.password.is_none() {
                    return Err(ApiError::Validation("Password is required".to_string()));
                }
                user_repo::create(portal, &form).await?;
                tracing::info!("✅ User created: {}", form.username);
            }
        }

        self.reload(portal).await;
        Ok(())
    }

    /// Deletes a user after confirmation, then reloads the list.
    pub async fn delete<F>(&mut self, portal: &Portal, user_id: i64, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(false);
        }

        user_repo::delete(portal, user_id).await?;
        tracing::info!("🗑️ User {} deleted", user_id);

        self.reload(portal).await;
        Ok(true)
    }
}
