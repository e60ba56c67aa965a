//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::{ErrorResponse, LiveRoomDto},
    ui::state::AppState,
    usecase::ConnectError,
};
use hiroba_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List rooms that currently have a dispatch loop
pub async fn get_live_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<LiveRoomDto>> {
    let rooms = state.get_live_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let live_rooms = rooms
        .into_iter()
        .map(|room| LiveRoomDto {
            id: room.room_id.into_string(),
            members: room.members,
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(live_rooms)
}

impl ConnectError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::RoomNotFound(_) | Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::RepositoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "Invalid request",
            Self::RoomNotFound(_) => "Chat-room not found",
            Self::UserNotFound(_) => "User not found",
            Self::RepositoryUnavailable(_) => "Service unavailable",
        }
    }
}

impl IntoResponse for ConnectError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.message(), self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}
