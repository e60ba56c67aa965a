//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Room からの退出と、空になった Room の Registry からの削除
//!
//! ### なぜこのテストが必要か
//! - 切断のたびに空の Room を掃除しないと Registry が肥大化し続ける
//! - 既に退出済み（dispatch ループに追い出された）接続の切断でも壊れないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断（他のメンバーが残る）
//! - エッジケース：最後の参加者の切断、既に追い出された参加者の切断

use std::sync::Arc;

use crate::{
    domain::Connection,
    infrastructure::room::{RoomHandle, RoomRegistry},
};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Room Registry（接続中の Room の管理）
    registry: Arc<RoomRegistry>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者切断を実行
    ///
    /// 何度呼んでも安全。
    ///
    /// # Returns
    ///
    /// Room が空になり Registry から削除された場合は `true`
    pub async fn execute(&self, connection: &Connection, room: &RoomHandle) -> bool {
        // 1. Room から退出（既に追い出されていれば何もしない）
        let left = room.leave(&connection.id).await;
        if !left {
            tracing::debug!(
                connection_id = %connection.id,
                room_id = %connection.room_id,
                "Connection was no longer a member"
            );
        }

        // 2. 空になっていれば Registry から削除
        self.registry.remove_if_empty(&connection.room_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomId, RoomSettings};
    use hiroba_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn create_test_registry() -> Arc<RoomRegistry> {
        Arc::new(RoomRegistry::new(
            RoomSettings::default(),
            Arc::new(FixedClock::new(1_672_498_800_000)),
        ))
    }

    async fn join(
        registry: &RoomRegistry,
        room: &str,
    ) -> (Connection, RoomHandle, mpsc::Receiver<String>) {
        let connection = Connection::new(RoomId::new(room.to_string()).unwrap(), None);
        let (tx, rx) = mpsc::channel(8);
        let handle = registry
            .join(&connection.room_id, connection.member(tx))
            .await
            .unwrap();
        (connection, handle, rx)
    }

    #[tokio::test]
    async fn test_disconnect_participant_keeps_occupied_room() {
        // テスト項目: 他のメンバーが残っていれば Room は削除されない
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = DisconnectParticipantUseCase::new(registry.clone());
        let (alice, room, _rx_a) = join(&registry, "r1").await;
        let (bob, _, _rx_b) = join(&registry, "r1").await;

        // when (操作):
        let removed = usecase.execute(&alice, &room).await;

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(registry.len().await, 1);
        assert_eq!(room.member_ids().await, vec![bob.id.clone()]);
    }

    #[tokio::test]
    async fn test_disconnect_last_participant_removes_room() {
        // テスト項目: 最後の参加者が切断すると Room が Registry から削除される
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = DisconnectParticipantUseCase::new(registry.clone());
        let (alice, room, _rx) = join(&registry, "r1").await;

        // when (操作):
        let removed = usecase.execute(&alice, &room).await;

        // then (期待する結果):
        assert!(removed);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_disconnect_twice_is_safe() {
        // テスト項目: 同じ接続の二重切断は問題なく処理される（冪等性）
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = DisconnectParticipantUseCase::new(registry.clone());
        let (alice, room, _rx) = join(&registry, "r1").await;
        usecase.execute(&alice, &room).await;

        // when (操作):
        let removed = usecase.execute(&alice, &room).await;

        // then (期待する結果):
        assert!(!removed);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_disconnect_does_not_touch_other_rooms() {
        // テスト項目: 切断は自分の Room 以外に影響しない
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = DisconnectParticipantUseCase::new(registry.clone());
        let (alice, room1, _rx_a) = join(&registry, "r1").await;
        let (_bob, _, _rx_b) = join(&registry, "r2").await;

        // when (操作):
        usecase.execute(&alice, &room1).await;

        // then (期待する結果):
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].room_id.as_str(), "r2");
        assert_eq!(snapshot[0].members, 1);
    }
}
