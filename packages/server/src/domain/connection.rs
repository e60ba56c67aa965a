//! Per-socket session state.

use std::collections::HashSet;

use super::{ConnectionId, ConnectionIdFactory, Member, MemberChannel, RoomId, UserId};

/// One accepted duplex socket, bound to a room at handshake time.
///
/// Owned by the connection's ingress loop. The room only ever sees the
/// [`Member`] view of it.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub room_id: RoomId,
    /// User declared at handshake (`?user_id=`), already validated
    pub owner: Option<UserId>,
    /// User ids that passed the existence check on this connection
    verified_users: HashSet<UserId>,
}

impl Connection {
    pub fn new(room_id: RoomId, owner: Option<UserId>) -> Self {
        let verified_users = owner.iter().cloned().collect();
        Self {
            id: ConnectionIdFactory::generate(),
            room_id,
            owner,
            verified_users,
        }
    }

    /// Whether `user_id` has already been checked against the gateway.
    pub fn is_verified(&self, user_id: &UserId) -> bool {
        self.verified_users.contains(user_id)
    }

    pub fn mark_verified(&mut self, user_id: UserId) {
        self.verified_users.insert(user_id);
    }

    /// Whether a frame claiming `user_id` may be sent on this connection.
    ///
    /// Connections without a declared owner accept any user id.
    pub fn may_send_as(&self, user_id: &UserId) -> bool {
        self.owner.as_ref().is_none_or(|owner| owner == user_id)
    }

    /// The room-side view of this connection.
    pub fn member(&self, outbound: MemberChannel) -> Member {
        Member::new(self.id.clone(), self.owner.clone(), outbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_id() -> RoomId {
        RoomId::new("r1".to_string()).unwrap()
    }

    fn user_id(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_owner_is_verified_from_the_start() {
        // テスト項目: ハンドシェイクで検証済みのオーナーは最初から検証済み扱い
        // when (操作):
        let connection = Connection::new(room_id(), Some(user_id("u1")));

        // then (期待する結果):
        assert!(connection.is_verified(&user_id("u1")));
        assert!(!connection.is_verified(&user_id("u2")));
    }

    #[test]
    fn test_mark_verified() {
        // テスト項目: mark_verified したユーザーは検証済みになる
        // given (前提条件):
        let mut connection = Connection::new(room_id(), None);

        // when (操作):
        connection.mark_verified(user_id("u2"));

        // then (期待する結果):
        assert!(connection.is_verified(&user_id("u2")));
    }

    #[test]
    fn test_may_send_as_with_and_without_owner() {
        // テスト項目: オーナー付きの接続はオーナー以外の名義で送信できない
        // given (前提条件):
        let anonymous = Connection::new(room_id(), None);
        let owned = Connection::new(room_id(), Some(user_id("u1")));

        // then (期待する結果):
        assert!(anonymous.may_send_as(&user_id("u9")));
        assert!(owned.may_send_as(&user_id("u1")));
        assert!(!owned.may_send_as(&user_id("u9")));
    }
}
