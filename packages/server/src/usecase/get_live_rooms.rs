//! UseCase: 接続中の Room 一覧取得

use std::sync::Arc;

use crate::infrastructure::room::{RoomRegistry, RoomSnapshot};

/// 接続中の Room 一覧取得のユースケース
pub struct GetLiveRoomsUseCase {
    registry: Arc<RoomRegistry>,
}

impl GetLiveRoomsUseCase {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Room 一覧を ID 順で返す
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        self.registry.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomId, RoomSettings};
    use hiroba_shared::time::FixedClock;

    #[tokio::test]
    async fn test_get_live_rooms() {
        // テスト項目: Registry にある Room が一覧として返される
        // given (前提条件):
        let registry = Arc::new(RoomRegistry::new(
            RoomSettings::default(),
            Arc::new(FixedClock::new(0)),
        ));
        registry
            .get_or_create(&RoomId::new("lobby".to_string()).unwrap())
            .await;
        let usecase = GetLiveRoomsUseCase::new(registry);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_id.as_str(), "lobby");
        assert_eq!(rooms[0].members, 0);
    }
}
