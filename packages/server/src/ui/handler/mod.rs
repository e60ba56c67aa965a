//! axum handlers.

mod http;
mod websocket;

pub use http::{get_live_rooms, health_check};
pub use websocket::websocket_handler;
