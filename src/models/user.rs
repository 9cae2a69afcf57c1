use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::models::theory::Theory;

/// An authorization label attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

/// Represents a user as listed by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The user's username.
    pub username: String,
    /// The user's email address.
    #[serde(default)]
    pub email: String,
    /// The user's roles. The backend calls this field `ruoli`.
    #[serde(default, alias = "ruoli")]
    pub roles: Vec<Role>,
}

/// The current user's profile, returned by `/utenti/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "nomeUtente", alias = "name")]
    pub username: Option<String>,
    #[serde(default, alias = "indirizzoEmail", alias = "mail")]
    pub email: Option<String>,
    #[serde(default, alias = "ruoli")]
    pub roles: Vec<String>,
    /// The user's favorite theories.
    #[serde(default, rename = "teoriePreferite")]
    pub favorites: Vec<Theory>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("N/A")
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("N/A")
    }

    pub fn is_favorite(&self, theory_id: i64) -> bool {
        self.favorites.iter().any(|t| t.id == theory_id)
    }
}

/// The admin form for creating or editing a user.
///
/// An empty password on edit means "keep the current one" and is left out of
/// the request body.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UserForm {
    #[garde(length(chars, min = 1, max = 30))]
    pub username: String,
    #[garde(email)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub password: Option<String>,
    #[garde(length(min = 1))]
    pub roles: Vec<Role>,
}

impl UserForm {
    /// Pre-fills the form from an existing user, leaving the password blank.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: None,
            roles: user.roles.clone(),
        }
    }
}
