//! Domain layer for the chat server.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod connection;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod room;
pub mod value_object;

pub use connection::Connection;
pub use entity::{ChatMessage, ChatRoom, MessageReceipt, User};
pub use error::{RepositoryError, RoomError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use repository::ChatRepository;
#[cfg(test)]
pub use repository::MockChatRepository;
pub use room::{EchoPolicy, Member, MemberChannel, RoomMembers, RoomSettings};
pub use value_object::{ConnectionId, MessageBody, MessageId, RoomId, Timestamp, UserId};
