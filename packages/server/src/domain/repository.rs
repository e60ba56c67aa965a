//! Repository trait 定義
//!
//! ドメイン層が必要とする永続化ゲートウェイのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, ChatRoom, MessageReceipt, RepositoryError, RoomId, User, UserId};

/// Chat Repository trait（永続化ゲートウェイ）
///
/// ドキュメント DB などの永続化層への窓口。UseCase 層はこの trait にのみ依存する。
///
/// 全てのメソッドは `RepositoryError::Unavailable` を返す可能性がある。
/// これは一時的な失敗であり、「存在しない」という意味ではない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// ID でチャットルームを取得
    ///
    /// 存在しない場合は `RepositoryError::ChatRoomNotFound`
    async fn find_chat_room_by_id(&self, id: &RoomId) -> Result<ChatRoom, RepositoryError>;

    /// ID でユーザーを取得
    ///
    /// 存在しない場合は `RepositoryError::UserNotFound`
    async fn find_user_by_id(&self, id: &UserId) -> Result<User, RepositoryError>;

    /// メッセージを永続化し、採番された ID と作成時刻を返す
    async fn create_message(&self, message: &ChatMessage)
    -> Result<MessageReceipt, RepositoryError>;
}
