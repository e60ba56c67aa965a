//! Fixture file for the in-memory gateway.
//!
//! Accepts the document shape of the original chat store, so exported
//! `chat_rooms` and `users` collections can be loaded as-is:
//!
//! ```json
//! {
//!   "chat_rooms": [{ "_id": "r1", "name": "general" }],
//!   "users": [{ "_id": "u1", "username": "alice", "firstname": "Alice" }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ValueObjectError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record in seed file: {0}")]
    Invalid(#[from] ValueObjectError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub chat_rooms: Vec<SeedChatRoom>,
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedChatRoom {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "firstname")]
    pub first_name: String,
    #[serde(default, alias = "lastname")]
    pub last_name: String,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
