//! インメモリ実装

mod chat;

pub use chat::{InMemoryChatRepository, StoredMessage};
