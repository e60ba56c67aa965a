//! Process-wide room registry.
//!
//! The map lock only guards map operations. It is never held while waiting
//! on a room's queue, so one busy room cannot stall another room's joins.

use std::{collections::HashMap, sync::Arc};

use hiroba_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{Member, RoomError, RoomId, RoomSettings, Timestamp};

use super::dispatcher::RoomHandle;

/// Point-in-time view of one live room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub members: usize,
    pub created_at: Timestamp,
}

/// Mapping from room id to the live room for that id.
pub struct RoomRegistry {
    rooms: Mutex<HashMap<RoomId, RoomHandle>>,
    settings: RoomSettings,
    clock: Arc<dyn Clock>,
}

impl RoomRegistry {
    pub fn new(settings: RoomSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            settings,
            clock,
        }
    }

    /// Return the live room for `room_id`, creating it (and its dispatch
    /// task) if there is none.
    ///
    /// Concurrent callers for the same unseen id all get the same room.
    pub async fn get_or_create(&self, room_id: &RoomId) -> RoomHandle {
        let mut rooms = self.rooms.lock().await;

        if let Some(room) = rooms.get(room_id) {
            if !room.is_closed() {
                return room.clone();
            }
            tracing::warn!(room_id = %room_id, "Replacing a room whose dispatch loop stopped");
        }

        let room = RoomHandle::spawn(
            room_id.clone(),
            Timestamp::new(self.clock.now_millis()),
            self.settings.clone(),
        );
        rooms.insert(room_id.clone(), room.clone());
        tracing::info!(room_id = %room_id, live_rooms = rooms.len(), "Room created");

        room
    }

    /// Join `member` to the live room for `room_id`.
    ///
    /// If the room is torn down between lookup and join, the lookup is
    /// retried and a fresh room is created, so a join is never lost.
    pub async fn join(&self, room_id: &RoomId, member: Member) -> Result<RoomHandle, RoomError> {
        loop {
            let room = self.get_or_create(room_id).await;
            match room.join(member.clone()).await {
                Ok(()) => return Ok(room),
                Err(RoomError::Closed(_)) => {
                    tracing::debug!(room_id = %room_id, "Room closed during join, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Remove the room for `room_id` if nobody is in it.
    ///
    /// Returns `true` if the room was removed. Closing and removal happen
    /// under the map lock, so the map never holds a closed room.
    pub async fn remove_if_empty(&self, room_id: &RoomId) -> bool {
        let mut rooms = self.rooms.lock().await;

        let Some(room) = rooms.get(room_id) else {
            return false;
        };
        if !room.try_close() {
            return false;
        }

        rooms.remove(room_id);
        tracing::info!(room_id = %room_id, live_rooms = rooms.len(), "Room removed");
        true
    }

    pub async fn get(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms.lock().await.get(room_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rooms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rooms.lock().await.is_empty()
    }

    /// Live rooms sorted by id.
    pub async fn snapshot(&self) -> Vec<RoomSnapshot> {
        let rooms = self.rooms.lock().await;
        let mut snapshot: Vec<RoomSnapshot> = rooms
            .values()
            .map(|room| RoomSnapshot {
                room_id: room.room_id().clone(),
                members: room.member_count(),
                created_at: room.created_at(),
            })
            .collect();
        drop(rooms);

        snapshot.sort_by(|a, b| a.room_id.as_str().cmp(b.room_id.as_str()));
        snapshot
    }
}
