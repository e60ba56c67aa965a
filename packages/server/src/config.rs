//! Server configuration.

use std::time::Duration;

use crate::domain::{EchoPolicy, RoomSettings};

/// Everything the server needs to know before it starts accepting sockets.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Shared by every room
    pub room: RoomSettings,
    /// Capacity of each connection's outbound queue
    pub outbound_queue_capacity: usize,
}

impl ServerConfig {
    /// Socket writes use the same deadline as room fan-out.
    pub fn write_timeout(&self) -> Duration {
        self.room.write_timeout
    }

    pub fn with_echo_policy(mut self, echo_policy: EchoPolicy) -> Self {
        self.room.echo_policy = echo_policy;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            room: RoomSettings::default(),
            outbound_queue_capacity: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト値が CLI のデフォルトと一致する
        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.port, 8080);
        assert_eq!(config.room.queue_capacity, 1024);
        assert_eq!(config.outbound_queue_capacity, 256);
        assert_eq!(config.write_timeout(), Duration::from_millis(1000));
        assert_eq!(config.room.echo_policy, EchoPolicy::ExcludeSender);
    }

    #[test]
    fn test_with_echo_policy() {
        // テスト項目: エコー設定を上書きできる
        // when (操作):
        let config = ServerConfig::default().with_echo_policy(EchoPolicy::IncludeSender);

        // then (期待する結果):
        assert_eq!(config.room.echo_policy, EchoPolicy::IncludeSender);
    }
}
