use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::error::{ApiError, Result};
use crate::models::session::{BearerToken, Session};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the roles as a JSON array of strings.
pub const ROLES_KEY: &str = "roles";

struct Slot {
    session: Session,
    generation: u64,
}

/// The tab-scoped holder of the current session.
///
/// Every `set` and `clear` bumps a generation counter so that a flow which
/// started under one session can tell it has been replaced.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Slot>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Slot {
                session: Session::default(),
                generation: 0,
            })),
        }
    }

    /// Stores a new session and returns its generation.
    pub fn set<I, S>(&self, token: BearerToken, roles: I) -> u64
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: BTreeSet<String> = roles.into_iter().map(Into::into).collect();
        let mut slot = self.inner.write();
        slot.generation += 1;
        slot.session = Session {
            token: Some(token),
            roles,
            established_at: Some(Utc::now()),
        };
        tracing::debug!("🔑 Session stored (generation {})", slot.generation);
        slot.generation
    }

    pub fn get(&self) -> Session {
        self.inner.read().session.clone()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.inner.read().session.token.clone()
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Drops the session. Safe to call when nobody is logged in.
    pub fn clear(&self) {
        let mut slot = self.inner.write();
        if slot.session.token.is_none() && slot.session.roles.is_empty() {
            return;
        }
        slot.generation += 1;
        slot.session = Session::default();
        tracing::debug!("🧹 Session cleared (generation {})", slot.generation);
    }

    /// Clears only if the session is still the one identified by `generation`.
    ///
    /// Returns `true` when this call did the clearing.
    pub fn clear_if(&self, generation: u64) -> bool {
        let mut slot = self.inner.write();
        if slot.generation != generation || slot.session.token.is_none() {
            return false;
        }
        slot.generation += 1;
        slot.session = Session::default();
        tracing::debug!("🧹 Session invalidated (generation {})", slot.generation);
        true
    }

    /// The storage entries (`token`, `roles`) for the current session.
    pub fn snapshot(&self) -> Result<Option<[(&'static str, String); 2]>> {
        let session = self.get();
        let Some(token) = session.token else {
            return Ok(None);
        };
        let roles: Vec<&String> = session.roles.iter().collect();
        let roles_json = sonic_rs::to_string(&roles)
            .map_err(|e| ApiError::Decode(format!("Roles serialization failed: {}", e)))?;
        Ok(Some([
            (TOKEN_KEY, token.expose().to_string()),
            (ROLES_KEY, roles_json),
        ]))
    }

    /// Rebuilds the session from stored entries. A missing token leaves the
    /// store empty.
    pub fn restore(&self, token: Option<&str>, roles_json: Option<&str>) -> Result<bool> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            self.clear();
            return Ok(false);
        };
        let roles: Vec<String> = match roles_json {
            Some(raw) => sonic_rs::from_str(raw)
                .map_err(|e| ApiError::Decode(format!("Stored roles are invalid: {}", e)))?,
            None => Vec::new(),
        };
        self.set(BearerToken::new(token), roles);
        Ok(true)
    }
}
