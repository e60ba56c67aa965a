//! Data Transfer Objects (DTOs) for the chat server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs
//! - `http`: HTTP API response DTOs
//! - `seed`: fixture file for the in-memory gateway

pub mod conversion;
pub mod http;
pub mod seed;
pub mod websocket;
