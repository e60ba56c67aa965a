//! WebSocket wire DTOs.

use serde::{Deserialize, Serialize};

/// One chat frame, identical in both directions.
///
/// The room id is not on the wire: it is bound from the upgrade path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub user_id: String,
    pub body: String,
}
