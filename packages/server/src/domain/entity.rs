//! Domain entities.
//!
//! Records owned by the persistence gateway. The server only reads chat-rooms
//! and users, and only creates messages.

use serde::{Deserialize, Serialize};

use super::{MessageBody, MessageId, RoomId, Timestamp, UserId};

/// A persisted chat-room record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: RoomId,
    pub name: String,
}

impl ChatRoom {
    pub fn new(id: RoomId, name: String) -> Self {
        Self { id, name }
    }
}

/// A persisted user record (credentials are not loaded by this server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn new(id: UserId, username: String) -> Self {
        Self {
            id,
            username,
            first_name: String::new(),
            last_name: String::new(),
        }
    }
}

/// A chat message bound to the room it was sent in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn new(user_id: UserId, room_id: RoomId, body: MessageBody) -> Self {
        Self {
            user_id,
            room_id,
            body,
        }
    }
}

/// Acknowledgement of a durable message write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub id: MessageId,
    pub created_at: Timestamp,
}
