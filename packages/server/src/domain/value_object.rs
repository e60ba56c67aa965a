//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of room and user identifiers.
pub const MAX_ID_LENGTH: usize = 100;

/// Maximum number of characters in a message body.
pub const MAX_BODY_LENGTH: usize = 4096;

/// Chat-room identifier value object.
///
/// Opaque to this server: whatever string the persistence gateway uses as
/// the chat-room key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Arguments
    ///
    /// * `id` - The room identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.chars().count();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the UserId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.chars().count();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::UserIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one accepted socket.
///
/// Generated by [`ConnectionIdFactory`](super::factory::ConnectionIdFactory);
/// two sockets of the same user get different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub(crate) fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned by the persistence gateway to a stored message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message body value object.
///
/// Empty bodies are accepted as the gateway stores them verbatim; only the
/// length is bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    /// Create a new MessageBody.
    ///
    /// # Arguments
    ///
    /// * `body` - The message text
    ///
    /// # Returns
    ///
    /// A Result containing the MessageBody or an error if it is too long
    pub fn new(body: String) -> Result<Self, ValueObjectError> {
        let len = body.chars().count();
        if len > MAX_BODY_LENGTH {
            return Err(ValueObjectError::MessageBodyTooLong {
                max: MAX_BODY_LENGTH,
                actual: len,
            });
        }
        Ok(Self(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Timestamp value object (Unix epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_new_valid() {
        // テスト項目: 有効な文字列から RoomId を生成できる
        // when (操作):
        let result = RoomId::new("65a1f0c2e4b0a1b2c3d4e5f6".to_string());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_room_id_empty_is_rejected() {
        // テスト項目: 空文字列の RoomId はエラーになる
        // when (操作):
        let result = RoomId::new(String::new());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::RoomIdEmpty));
    }

    #[test]
    fn test_room_id_too_long_is_rejected() {
        // テスト項目: 上限を超える長さの RoomId はエラーになる
        // given (前提条件):
        let id = "r".repeat(MAX_ID_LENGTH + 1);

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::RoomIdTooLong {
                max: MAX_ID_LENGTH,
                actual: MAX_ID_LENGTH + 1,
            })
        );
    }

    #[test]
    fn test_user_id_boundaries() {
        // テスト項目: UserId の長さ境界値（上限ちょうどは OK、空は NG）
        // given (前提条件):
        let at_limit = "u".repeat(MAX_ID_LENGTH);

        // when (操作):
        let ok = UserId::try_from(at_limit);
        let empty = UserId::try_from(String::new());

        // then (期待する結果):
        assert!(ok.is_ok());
        assert_eq!(empty, Err(ValueObjectError::UserIdEmpty));
    }

    #[test]
    fn test_message_body_counts_characters_not_bytes() {
        // テスト項目: MessageBody の長さはバイト数ではなく文字数で判定される
        // given (前提条件): マルチバイト文字のみで上限ちょうど
        let body = "あ".repeat(MAX_BODY_LENGTH);

        // when (操作):
        let result = MessageBody::new(body);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_message_body_allows_empty_but_rejects_too_long() {
        // テスト項目: 空のメッセージは許可され、長すぎるメッセージは拒否される
        // when (操作):
        let empty = MessageBody::new(String::new());
        let too_long = MessageBody::new("x".repeat(MAX_BODY_LENGTH + 1));

        // then (期待する結果):
        assert!(empty.is_ok());
        assert!(matches!(
            too_long,
            Err(ValueObjectError::MessageBodyTooLong { .. })
        ));
    }
}
