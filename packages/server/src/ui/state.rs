//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLiveRoomsUseCase,
    SendMessageUseCase,
};

/// State handed to every axum handler
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetLiveRoomsUseCase（接続中の Room 一覧取得のユースケース）
    pub get_live_rooms_usecase: Arc<GetLiveRoomsUseCase>,
    /// Capacity of each connection's outbound queue
    pub outbound_queue_capacity: usize,
    /// Longest time one socket write may take before the connection is dropped
    pub write_timeout: Duration,
}
