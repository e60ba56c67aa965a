//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// MessageBody too long error
    #[error("MessageBody cannot exceed {max} characters (got {actual})")]
    MessageBodyTooLong { max: usize, actual: usize },
}

/// Errors returned by the persistence gateway.
///
/// `*NotFound` means the record is definitively absent. `Unavailable` is
/// transient and the caller may retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Chat-room '{0}' not found")]
    ChatRoomNotFound(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Persistence gateway unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Whether this error reports a definitive absence rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ChatRoomNotFound(_) | Self::UserNotFound(_))
    }
}

/// Errors related to Room membership and dispatch
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The room was removed from the registry and accepts no more commands
    #[error("Room '{0}' is closed")]
    Closed(String),

    /// The connection is already a member of the room
    #[error("Connection '{0}' already joined the room")]
    AlreadyJoined(String),
}
