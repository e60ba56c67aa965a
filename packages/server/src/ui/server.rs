//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use hiroba_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::ChatRepository,
    infrastructure::room::RoomRegistry,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLiveRoomsUseCase,
        SendMessageUseCase,
    },
};

use super::{
    handler::{get_live_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(&ServerConfig::default(), repository, Arc::new(SystemClock));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Wire the room registry and use cases around `repository`.
    pub fn new(
        config: &ServerConfig,
        repository: Arc<dyn ChatRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        // 1. Room Registry
        let registry = Arc::new(RoomRegistry::new(config.room.clone(), clock));

        // 2. UseCases
        let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
            repository.clone(),
            registry.clone(),
        ));
        let disconnect_participant_usecase =
            Arc::new(DisconnectParticipantUseCase::new(registry.clone()));
        let send_message_usecase = Arc::new(SendMessageUseCase::new(repository));
        let get_live_rooms_usecase = Arc::new(GetLiveRoomsUseCase::new(registry));

        // 3. AppState
        let state = Arc::new(AppState {
            connect_participant_usecase,
            disconnect_participant_usecase,
            send_message_usecase,
            get_live_rooms_usecase,
            outbound_queue_capacity: config.outbound_queue_capacity,
            write_timeout: config.write_timeout(),
        });

        Self { state }
    }

    /// Build the router with every endpoint.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/chat-room/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/live-rooms", get(get_live_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws/chat-room/{{room_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
