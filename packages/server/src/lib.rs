//! Room-scoped real-time chat server.
//!
//! Clients connect to `/ws/chat-room/{room_id}`. Every message is persisted
//! through a [`domain::ChatRepository`] and then fanned out to the other
//! connections in the same room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
