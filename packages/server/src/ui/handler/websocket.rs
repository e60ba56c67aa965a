//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, MessageBody, RoomId, UserId},
    infrastructure::{dto::websocket::ChatFrame, room::RoomHandle},
    ui::state::AppState,
    usecase::{ConnectError, IngressError},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Binds the connection to one user; frames naming anyone else are dropped
    pub user_id: Option<String>,
}

/// `GET /ws/chat-room/{room_id}`
///
/// The room (and the owner, if given) are checked before the upgrade. A
/// rejected handshake never touches the room registry.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<Response, ConnectError> {
    let connection = match authorize(&state, room_id.clone(), query.user_id).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!(room_id = %room_id, "Rejected handshake: {}", e);
            return Err(e);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection)))
}

async fn authorize(
    state: &AppState,
    room_id: String,
    user_id: Option<String>,
) -> Result<Connection, ConnectError> {
    let room_id = RoomId::try_from(room_id)?;
    let owner = user_id.map(UserId::try_from).transpose()?;

    state
        .connect_participant_usecase
        .validate(&room_id, owner.as_ref())
        .await?;

    Ok(Connection::new(room_id, owner))
}

/// Decode one inbound frame into its sender and body.
fn decode_frame(payload: &[u8]) -> Result<(UserId, MessageBody), IngressError> {
    let frame: ChatFrame = serde_json::from_slice(payload)?;
    Ok((UserId::new(frame.user_id)?, MessageBody::new(frame.body)?))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the room drops this connection's sender (leave or
/// eviction), or when a socket write fails or takes longer than `write_timeout`.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    write_timeout: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match tokio::time::timeout(write_timeout, sender.send(Message::Text(msg.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!("WebSocket write failed: {}", e);
                    break;
                }
                Err(_) => {
                    tracing::warn!("WebSocket write timed out");
                    break;
                }
            }
        }
    })
}

/// Read frames until the socket closes or sends something undecodable.
async fn ingress_loop(
    receiver: &mut SplitStream<WebSocket>,
    state: &AppState,
    connection: &mut Connection,
    room: &RoomHandle,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(connection_id = %connection.id, "WebSocket read failed: {}", e);
                break;
            }
        };

        let decoded = match msg {
            Message::Text(text) => decode_frame(text.as_str().as_bytes()),
            Message::Binary(bytes) => decode_frame(&bytes),
            Message::Close(_) => {
                tracing::info!(connection_id = %connection.id, "Client requested close");
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        let (user_id, body) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(connection_id = %connection.id, "Closing connection: {}", e);
                break;
            }
        };

        let sender = user_id.clone();
        match state
            .send_message_usecase
            .execute(connection, room, user_id, body)
            .await
        {
            Ok(receipt) => {
                tracing::debug!(
                    connection_id = %connection.id,
                    user_id = %sender,
                    message_id = receipt.id.as_str(),
                    "Message accepted"
                );
            }
            Err(e) => {
                tracing::warn!(
                    connection_id = %connection.id,
                    user_id = %sender,
                    "Dropped message: {}",
                    e
                );
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, mut connection: Connection) {
    let (sender, mut receiver) = socket.split();

    // Outbound queue, drained by the pusher task and fed by the room
    let (tx, rx) = mpsc::channel(state.outbound_queue_capacity.max(1));

    let room = match state
        .connect_participant_usecase
        .register(&connection, tx)
        .await
    {
        Ok(room) => room,
        Err(e) => {
            tracing::error!(connection_id = %connection.id, "Failed to join room: {}", e);
            return;
        }
    };
    tracing::info!(
        connection_id = %connection.id,
        room_id = %connection.room_id,
        owner = connection.owner.as_ref().map(UserId::as_str),
        "Connection registered"
    );

    let mut send_task = pusher_loop(rx, sender, state.write_timeout);

    // If either side finishes, stop the other
    tokio::select! {
        _ = ingress_loop(&mut receiver, &state, &mut connection, &room) => send_task.abort(),
        _ = &mut send_task => {
            tracing::info!(connection_id = %connection.id, "Outbound side closed");
        }
    };

    let removed = state
        .disconnect_participant_usecase
        .execute(&connection, &room)
        .await;
    tracing::info!(
        connection_id = %connection.id,
        room_id = %connection.room_id,
        room_removed = removed,
        "Connection closed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueObjectError;

    #[test]
    fn test_decode_frame_success() {
        // テスト項目: 正しい JSON フレームが送信者と本文に分解される
        // when (操作):
        let (user_id, body) = decode_frame(br#"{"user_id":"u1","body":"hi"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(user_id.as_str(), "u1");
        assert_eq!(body.as_str(), "hi");
    }

    #[test]
    fn test_decode_frame_allows_empty_body() {
        // テスト項目: 空の本文は許可される
        // when (操作):
        let result = decode_frame(br#"{"user_id":"u1","body":""}"#);

        // then (期待する結果):
        assert_eq!(result.unwrap().1.as_str(), "");
    }

    #[test]
    fn test_decode_frame_malformed_json() {
        // テスト項目: JSON として壊れたフレーム、フィールド不足のフレームは Malformed になる
        // then (期待する結果):
        assert!(matches!(
            decode_frame(b"not json"),
            Err(IngressError::Malformed(_))
        ));
        assert!(matches!(
            decode_frame(br#"{"body":"hi"}"#),
            Err(IngressError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_frame_invalid_fields() {
        // テスト項目: 空のユーザー ID、長すぎる本文は InvalidField になる
        // given (前提条件):
        let too_long = format!(r#"{{"user_id":"u1","body":"{}"}}"#, "a".repeat(4097));

        // then (期待する結果):
        assert!(matches!(
            decode_frame(br#"{"user_id":"","body":"hi"}"#),
            Err(IngressError::InvalidField(ValueObjectError::UserIdEmpty))
        ));
        assert!(matches!(
            decode_frame(too_long.as_bytes()),
            Err(IngressError::InvalidField(
                ValueObjectError::MessageBodyTooLong { .. }
            ))
        ));
    }
}
