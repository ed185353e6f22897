//! Database connector and connection state.
//!
//! # Data Flow
//! ```text
//! lifecycle::start
//!     → connect() (async, one-shot, no retry at this layer)
//!     → DbSlot (write-once, lock-free reads)
//!     → request handlers observe presence/absence at the point of use
//! ```
//!
//! # Design Decisions
//! - The slot is written at most once, at startup; afterwards it is
//!   read-only from the rest of the crate
//! - An empty slot is a per-request 503 concern, never a process crash
//! - Retry policy, if any, belongs behind the connector seam

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;
use uuid::Uuid;

use crate::config::DatabaseConfig;

/// Process-wide connection slot. Empty until a connection succeeds.
pub type DbSlot = Arc<ArcSwapOption<Database>>;

/// A fresh, unconnected slot.
pub fn empty_slot() -> DbSlot {
    Arc::new(ArcSwapOption::empty())
}

/// Error type for the connector.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("unsupported database scheme {0:?}")]
    UnsupportedScheme(String),
}

/// A stored user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Handle to the connected store.
///
/// Backed by an in-memory table behind the connector seam; handlers only
/// see these operations and the slot, so swapping in a remote store stays
/// local to this module.
#[derive(Debug, Default)]
pub struct Database {
    users: RwLock<HashMap<Uuid, User>>,
}

/// Establish a connection for the configured URL.
///
/// Accepts `memory://` URLs. Anything unparseable or with another scheme
/// fails, which is also how startup-failure behavior is exercised in
/// tests.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, DbError> {
    let url = Url::parse(&config.url).map_err(|source| DbError::InvalidUrl {
        url: config.url.clone(),
        source,
    })?;

    match url.scheme() {
        "memory" => Ok(Database::default()),
        other => Err(DbError::UnsupportedScheme(other.to_string())),
    }
}

impl Database {
    /// Insert a new user and return the stored record.
    pub async fn insert_user(
        &self,
        name: String,
        email: String,
        metadata: HashMap<String, String>,
    ) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            metadata,
        };
        self.users.write().await.insert(user.id, user.clone());
        user
    }

    /// Fetch a user by id.
    pub async fn user(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// All stored users.
    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }
}
