//! Player identity lookup used when assembling the room roster.
//!
//! Identity is an external collaborator: the core only needs a display
//! profile per seated player when it broadcasts the room roster. Lookups are
//! cosmetic — a failed one degrades to an empty avatar instead of blocking
//! game progress.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors from profile lookups
#[derive(Debug, Eq, Error, PartialEq)]
pub enum IdentityError {
    #[error("no profile for {0}")]
    UnknownUser(String),
    #[error("identity backend unavailable")]
    Unavailable,
}

/// Display profile for one seated player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    pub user_name: String,
    pub avatar: String,
}

impl Profile {
    /// Fallback profile when the lookup fails: the username stands in for
    /// the display name and the avatar is left empty.
    pub fn degraded(username: &str) -> Self {
        Self {
            full_name: username.to_string(),
            user_name: username.to_string(),
            avatar: String::new(),
        }
    }
}

/// Resolves usernames to display profiles.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn profile(&self, username: &str) -> Result<Profile, IdentityError>;
}

/// In-memory directory for deployments without an identity service.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a profile.
    pub fn insert(&self, profile: Profile) {
        let mut profiles = self.profiles.write().expect("directory lock poisoned");
        profiles.insert(profile.user_name.clone(), profile);
    }
}

#[async_trait]
impl IdentityLookup for StaticDirectory {
    async fn profile(&self, username: &str) -> Result<Profile, IdentityError> {
        let profiles = self.profiles.read().expect("directory lock poisoned");
        profiles
            .get(username)
            .cloned()
            .ok_or_else(|| IdentityError::UnknownUser(username.to_string()))
    }
}
