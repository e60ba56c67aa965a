//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信ユーザーの検証 → 永続化 → Room への dispatch の順序
//!
//! ### なぜこのテストが必要か
//! - 永続化に失敗したメッセージは誰にも届いてはいけない
//! - ユーザーの存在確認は接続ごと・ユーザーごとに 1 回だけ行う
//! - 送信者以外の同じ Room のメンバー全員に、同じ順序で届くことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 人の Room で 1 人が送信し、残り 2 人が受信
//! - 異常系：存在しないユーザー、永続化の失敗、オーナーと異なる送信者
//! - エッジケース：100 接続の Room

use std::sync::Arc;

use crate::{
    domain::{ChatMessage, ChatRepository, Connection, MessageBody, MessageReceipt, UserId},
    infrastructure::room::RoomHandle,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（永続化ゲートウェイの抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection` - メッセージを受信した接続
    /// * `room` - 接続が参加している Room
    /// * `user_id` - フレームに記載された送信者
    /// * `body` - メッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(MessageReceipt)` - 永続化され、Room のキューに積まれた
    /// * `Err(SendMessageError)` - メッセージは破棄された（接続は維持する）
    pub async fn execute(
        &self,
        connection: &mut Connection,
        room: &RoomHandle,
        user_id: UserId,
        body: MessageBody,
    ) -> Result<MessageReceipt, SendMessageError> {
        // 1. オーナーが宣言された接続では、他人になりすました送信を拒否
        if !connection.may_send_as(&user_id) {
            return Err(SendMessageError::SenderMismatch {
                claimed: user_id.into_string(),
                owner: connection
                    .owner
                    .as_ref()
                    .map(|owner| owner.as_str().to_string())
                    .unwrap_or_default(),
            });
        }

        // 2. この接続で初めて見るユーザーなら存在確認
        if !connection.is_verified(&user_id) {
            match self.repository.find_user_by_id(&user_id).await {
                Ok(_) => connection.mark_verified(user_id.clone()),
                Err(e) if e.is_not_found() => {
                    return Err(SendMessageError::UnknownUser(user_id.into_string()));
                }
                Err(e) => return Err(SendMessageError::UserLookupFailed(e.to_string())),
            }
        }

        // 3. 永続化（失敗したら誰にも配信しない）
        let message = ChatMessage::new(user_id, connection.room_id.clone(), body);
        let receipt = self
            .repository
            .create_message(&message)
            .await
            .map_err(|e| SendMessageError::PersistFailed(e.to_string()))?;

        // 4. Room の dispatch キューに積む
        room.dispatch(&connection.id, message)
            .await
            .map_err(|_| SendMessageError::RoomClosed(connection.room_id.as_str().to_string()))?;

        Ok(receipt)
    }
}
