//! Room-scoped WebSocket chat server.
//!
//! Receives messages from clients, persists them, and broadcasts them to the
//! other connections in the same chat-room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server -- --room general --user alice
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --seed seed.json
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use hiroba_server::{
    config::ServerConfig,
    domain::{ChatRoom, EchoPolicy, RoomId, RoomSettings, User, UserId},
    infrastructure::{
        dto::seed::{SeedData, SeedError},
        repository::InMemoryChatRepository,
    },
    ui::Server,
};
use hiroba_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Room-scoped WebSocket chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HIROBA_PORT", default_value = "8080")]
    port: u16,

    /// Capacity of each room's command queue
    #[arg(long, env = "HIROBA_ROOM_QUEUE_CAPACITY", default_value = "1024")]
    room_queue_capacity: usize,

    /// Capacity of each connection's outbound queue
    #[arg(long, env = "HIROBA_OUTBOUND_QUEUE_CAPACITY", default_value = "256")]
    outbound_queue_capacity: usize,

    /// Milliseconds a write may wait on a slow connection before it is dropped
    #[arg(long, env = "HIROBA_WRITE_TIMEOUT_MS", default_value = "1000")]
    write_timeout_ms: u64,

    /// Deliver messages back to the connection that sent them
    #[arg(long, env = "HIROBA_ECHO_TO_SENDER")]
    echo_to_sender: bool,

    /// JSON file with `chat_rooms` and `users` to load into the in-memory store
    #[arg(long, env = "HIROBA_SEED")]
    seed: Option<PathBuf>,

    /// Chat-room id to create at startup (repeatable)
    #[arg(long = "room", env = "HIROBA_ROOMS", value_delimiter = ',')]
    rooms: Vec<String>,

    /// User id to create at startup (repeatable)
    #[arg(long = "user", env = "HIROBA_USERS", value_delimiter = ',')]
    users: Vec<String>,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        let echo_policy = if self.echo_to_sender {
            EchoPolicy::IncludeSender
        } else {
            EchoPolicy::ExcludeSender
        };

        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            room: RoomSettings {
                queue_capacity: self.room_queue_capacity,
                write_timeout: Duration::from_millis(self.write_timeout_ms),
                echo_policy,
            },
            outbound_queue_capacity: self.outbound_queue_capacity,
        }
    }

    /// Build the in-memory store from `--seed`, then add `--room` / `--user`.
    async fn repository(&self, clock: Arc<dyn Clock>) -> Result<InMemoryChatRepository, SeedError> {
        let seed = match &self.seed {
            Some(path) => SeedData::from_path(path)?,
            None => SeedData::default(),
        };
        let repository = InMemoryChatRepository::from_seed(seed, clock)?;

        for room in &self.rooms {
            let id = RoomId::new(room.clone())?;
            repository
                .insert_chat_room(ChatRoom::new(id, room.clone()))
                .await;
        }
        for user in &self.users {
            let id = UserId::new(user.clone())?;
            repository.insert_user(User::new(id, user.clone())).await;
        }

        Ok(repository)
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = args.server_config();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 1. Create Repository (in-memory document store)
    let repository = match args.repository(clock.clone()).await {
        Ok(repository) => Arc::new(repository),
        Err(e) => {
            tracing::error!("Failed to prepare chat store: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Create and run the server
    tracing::info!(
        room_queue_capacity = config.room.queue_capacity,
        outbound_queue_capacity = config.outbound_queue_capacity,
        write_timeout_ms = args.write_timeout_ms,
        echo_to_sender = args.echo_to_sender,
        "Starting server"
    );
    let server = Server::new(&config, repository, clock);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
