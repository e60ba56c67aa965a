//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Errors that reject a WebSocket handshake.
///
/// No room is created or joined when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] ValueObjectError),

    #[error("Chat-room '{0}' does not exist")]
    RoomNotFound(String),

    #[error("User '{0}' does not exist")]
    UserNotFound(String),

    #[error("Could not reach the persistence gateway: {0}")]
    RepositoryUnavailable(String),
}

/// Errors that drop one incoming message. The connection stays open.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("User '{0}' does not exist")]
    UnknownUser(String),

    #[error("Could not look up user: {0}")]
    UserLookupFailed(String),

    #[error("Connection owned by '{owner}' cannot send as '{claimed}'")]
    SenderMismatch { claimed: String, owner: String },

    #[error("Failed to persist message: {0}")]
    PersistFailed(String),

    #[error("Room '{0}' is closed")]
    RoomClosed(String),
}

/// Errors decoding an incoming frame. Fatal to the connection that sent it.
#[derive(Debug, Error)]
pub enum IngressError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid field in frame: {0}")]
    InvalidField(#[from] ValueObjectError),
}
