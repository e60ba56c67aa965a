//! Domain factories for generating identifiers.

use super::{ConnectionId, MessageId};

/// Factory for generating ConnectionId instances.
///
/// Keeps id generation apart from the value object itself.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for message ids, used by gateways that do not assign their own.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId as a simple (hyphen-less) UUID v4.
    pub fn generate() -> MessageId {
        MessageId::new(uuid::Uuid::new_v4().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_generate() {
        // テスト項目: ConnectionIdFactory::generate() で UUID v4 形式の ID を生成できる
        // when (操作):
        let connection_id = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_eq!(connection_id.as_str().len(), 36); // UUID v4 の標準長（ハイフン含む）
    }

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // テスト項目: ConnectionIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_message_id_factory_generate_is_simple_uuid() {
        // テスト項目: MessageIdFactory はハイフンなしの UUID を生成する
        // when (操作):
        let message_id = MessageIdFactory::generate();

        // then (期待する結果):
        assert_eq!(message_id.as_str().len(), 32);
        assert!(!message_id.as_str().contains('-'));
    }
}
