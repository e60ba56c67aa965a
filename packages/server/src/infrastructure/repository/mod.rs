//! Repository 実装
//!
//! ドメイン層の ChatRepository trait の具体的な実装を提供します。

pub mod inmemory;

pub use inmemory::{InMemoryChatRepository, StoredMessage};
