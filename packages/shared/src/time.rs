//! Time helpers with a clock abstraction for testability.
//!
//! Timestamps are Unix epoch milliseconds. They are rendered in JST (UTC+9)
//! when shown to humans.

use chrono::{DateTime, FixedOffset, Utc};

/// JST is UTC+9.
const JST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_jst_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Current Unix timestamp in milliseconds.
///
/// Epoch milliseconds do not depend on the offset, so this is the same
/// instant whether it is later displayed in JST or UTC.
pub fn get_jst_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to RFC 3339 in JST.
///
/// Falls back to the raw number when the timestamp is out of chrono's range.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let offset = FixedOffset::east_opt(JST_OFFSET_SECONDS);
    let instant = DateTime::<Utc>::from_timestamp_millis(timestamp_millis);

    match (offset, instant) {
        (Some(offset), Some(instant)) => instant.with_timezone(&offset).to_rfc3339(),
        _ => timestamp_millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに減少しないタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp1 = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp1 > 0);
        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_timestamp() {
        // テスト項目: FixedClock が常に同じタイムスタンプを返す
        // given (前提条件):
        let clock = FixedClock::new(1_234_567_890_123);

        // when (操作):
        let first = clock.now_millis();
        let second = clock.now_millis();

        // then (期待する結果):
        assert_eq!(first, 1_234_567_890_123);
        assert_eq!(second, first);
    }

    #[test]
    fn test_timestamp_to_jst_rfc3339_format() {
        // テスト項目: タイムスタンプが JST の RFC 3339 形式に変換される
        // given (前提条件): 2023-01-01 00:00:00.123 JST
        let timestamp = 1_672_498_800_123;

        // when (操作):
        let result = timestamp_to_jst_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.starts_with("2023-01-01T00:00:00.123"));
        assert!(result.ends_with("+09:00"));
    }

    #[test]
    fn test_timestamp_to_jst_rfc3339_out_of_range_falls_back() {
        // テスト項目: 範囲外のタイムスタンプは数値のまま返される
        // when (操作):
        let result = timestamp_to_jst_rfc3339(i64::MAX);

        // then (期待する結果):
        assert_eq!(result, i64::MAX.to_string());
    }
}
