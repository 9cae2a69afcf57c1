use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::models::user::Role;
use crate::navigation::Route;

/// An opaque bearer credential issued at login.
///
/// The backing buffer is wiped on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Represents the client-side session of the current tab.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The bearer token, absent when nobody is logged in.
    pub token: Option<BearerToken>,
    /// Role identifiers as sent by the backend (`ROLE_USER`, `ROLE_ADMIN`, ...).
    pub roles: BTreeSet<String>,
    /// The timestamp when the session was established.
    pub established_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role.as_str())
    }

    /// Where a freshly logged-in user lands: admins first, then users, else home.
    pub fn landing_route(&self) -> Route {
        if self.has_role(Role::Admin) {
            Route::AdminDashboard
        } else if self.has_role(Role::User) {
            Route::UserDashboard
        } else {
            Route::Home
        }
    }
}
