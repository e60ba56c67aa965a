//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Error body returned by every failing HTTP endpoint, including a rejected
/// WebSocket handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub description: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            description: description.into(),
        }
    }
}

/// A room currently held in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveRoomDto {
    pub id: String,
    pub members: usize,
    /// RFC 3339 (JST)
    pub created_at: String,
}
