//! Room registry and per-room dispatch.
//!
//! ## 構成
//!
//! - `registry`: room_id → Room の対応表（遅延生成・空になったら削除）
//! - `dispatcher`: Room ごとの dispatch タスクとそのハンドル
//! - `occupancy`: Room を削除してよいかを判定する予約カウンタ

mod dispatcher;
mod occupancy;
mod registry;

pub use dispatcher::RoomHandle;
pub use registry::{RoomRegistry, RoomSnapshot};
