//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! HashMap をインメモリのドキュメントストアとして使用します。
//!
//! 起動時にシードファイル（または CLI 引数）からチャットルームとユーザーを読み込み、
//! メッセージは追記のみの Vec に保存します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use hiroba_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ChatMessage, ChatRepository, ChatRoom, MessageIdFactory, MessageReceipt, RepositoryError,
        RoomId, Timestamp, User, UserId,
    },
    infrastructure::dto::seed::{SeedData, SeedError},
};

/// 保存済みメッセージ（採番済み ID と作成時刻つき）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub receipt: MessageReceipt,
    pub message: ChatMessage,
}

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    chat_rooms: Mutex<HashMap<RoomId, ChatRoom>>,
    users: Mutex<HashMap<UserId, User>>,
    messages: Mutex<Vec<StoredMessage>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryChatRepository {
    /// 空の InMemoryChatRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            chat_rooms: Mutex::new(HashMap::new()),
            users: Mutex::new(HashMap::new()),
            messages: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// シードデータから InMemoryChatRepository を作成
    ///
    /// 不正な ID を含むレコードがあればエラーを返す（部分的な読み込みはしない）。
    pub fn from_seed(seed: SeedData, clock: Arc<dyn Clock>) -> Result<Self, SeedError> {
        let chat_rooms = seed
            .chat_rooms
            .into_iter()
            .map(|room| ChatRoom::try_from(room).map(|room| (room.id.clone(), room)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        let users = seed
            .users
            .into_iter()
            .map(|user| User::try_from(user).map(|user| (user.id.clone(), user)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        tracing::info!(
            chat_rooms = chat_rooms.len(),
            users = users.len(),
            "Loaded seed data"
        );

        Ok(Self {
            chat_rooms: Mutex::new(chat_rooms),
            users: Mutex::new(users),
            messages: Mutex::new(Vec::new()),
            clock,
        })
    }

    pub async fn insert_chat_room(&self, room: ChatRoom) {
        self.chat_rooms.lock().await.insert(room.id.clone(), room);
    }

    pub async fn insert_user(&self, user: User) {
        self.users.lock().await.insert(user.id.clone(), user);
    }

    /// 保存済みメッセージを保存順に取得
    pub async fn stored_messages(&self) -> Vec<StoredMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn find_chat_room_by_id(&self, id: &RoomId) -> Result<ChatRoom, RepositoryError> {
        self.chat_rooms
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::ChatRoomNotFound(id.as_str().to_string()))
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<User, RepositoryError> {
        self.users
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::UserNotFound(id.as_str().to_string()))
    }

    async fn create_message(
        &self,
        message: &ChatMessage,
    ) -> Result<MessageReceipt, RepositoryError> {
        let receipt = MessageReceipt {
            id: MessageIdFactory::generate(),
            created_at: Timestamp::new(self.clock.now_millis()),
        };

        self.messages.lock().await.push(StoredMessage {
            receipt: receipt.clone(),
            message: message.clone(),
        });

        Ok(receipt)
    }
}
