//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::validate() / register() メソッド
//! - ハンドシェイク時のチャットルーム（とユーザー）の存在確認
//! - Room Registry への登録
//!
//! ### なぜこのテストが必要か
//! - 存在しないチャットルームへの接続で Room が作られてはいけない
//! - 「存在しない」と「一時的に確認できない」を区別して返す必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：存在するチャットルームへの接続
//! - 異常系：存在しないチャットルーム / ユーザー、永続化層の一時的な失敗
//! - エッジケース：同じ接続の二重登録

use std::sync::Arc;

use crate::{
    domain::{
        ChatRepository, ChatRoom, Connection, MemberChannel, RepositoryError, RoomError, RoomId,
        UserId,
    },
    infrastructure::room::{RoomHandle, RoomRegistry},
};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（永続化ゲートウェイの抽象化）
    repository: Arc<dyn ChatRepository>,
    /// Room Registry（接続中の Room の管理）
    registry: Arc<RoomRegistry>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>, registry: Arc<RoomRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// ハンドシェイク前の検証を実行
    ///
    /// Registry には一切触れない。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続先のチャットルーム ID
    /// * `owner` - 接続のオーナーとして宣言されたユーザー ID（任意）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatRoom)` - 接続先のチャットルーム
    /// * `Err(ConnectError)` - 接続を拒否すべき理由
    pub async fn validate(
        &self,
        room_id: &RoomId,
        owner: Option<&UserId>,
    ) -> Result<ChatRoom, ConnectError> {
        // 1. チャットルームの存在確認
        let chat_room = self
            .repository
            .find_chat_room_by_id(room_id)
            .await
            .map_err(into_connect_error)?;

        // 2. オーナーが宣言されていればユーザーの存在確認
        if let Some(owner) = owner {
            self.repository
                .find_user_by_id(owner)
                .await
                .map_err(into_connect_error)?;
        }

        Ok(chat_room)
    }

    /// 検証済みの接続を Room に登録
    ///
    /// Room が存在しなければ作成される。
    pub async fn register(
        &self,
        connection: &Connection,
        outbound: MemberChannel,
    ) -> Result<RoomHandle, RoomError> {
        self.registry
            .join(&connection.room_id, connection.member(outbound))
            .await
    }
}

fn into_connect_error(error: RepositoryError) -> ConnectError {
    match error {
        RepositoryError::ChatRoomNotFound(id) => ConnectError::RoomNotFound(id),
        RepositoryError::UserNotFound(id) => ConnectError::UserNotFound(id),
        RepositoryError::Unavailable(reason) => ConnectError::RepositoryUnavailable(reason),
    }
}
