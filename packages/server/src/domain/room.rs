//! Room membership rules.
//!
//! Pure bookkeeping with no I/O. The room's dispatch task is the only owner
//! of a [`RoomMembers`] value, so none of this needs locking.

use std::{collections::HashMap, time::Duration};

use tokio::sync::mpsc;

use super::{ConnectionId, RoomError, UserId};

/// Outbound queue of one connection, drained by its writer task.
///
/// Dropping the last sender closes the queue, which ends the writer task and
/// with it the connection.
pub type MemberChannel = mpsc::Sender<String>;

/// One connection as seen by its room.
#[derive(Debug, Clone)]
pub struct Member {
    pub connection_id: ConnectionId,
    /// Owner bound at handshake, if the client declared one
    pub user_id: Option<UserId>,
    pub outbound: MemberChannel,
}

impl Member {
    pub fn new(connection_id: ConnectionId, user_id: Option<UserId>, outbound: MemberChannel) -> Self {
        Self {
            connection_id,
            user_id,
            outbound,
        }
    }
}

/// Whether a sender receives its own broadcast.
///
/// Chat clients render their own message locally, so the sender is excluded
/// unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoPolicy {
    #[default]
    ExcludeSender,
    IncludeSender,
}

/// Tunables shared by every room.
#[derive(Debug, Clone)]
pub struct RoomSettings {
    /// Capacity of the room's command queue; producers wait when it is full
    pub queue_capacity: usize,
    /// Longest time a dispatch waits on one member's outbound queue
    pub write_timeout: Duration,
    pub echo_policy: EchoPolicy,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            write_timeout: Duration::from_millis(1000),
            echo_policy: EchoPolicy::ExcludeSender,
        }
    }
}

/// The member set of one room, keyed by connection.
#[derive(Debug, Default)]
pub struct RoomMembers {
    members: HashMap<ConnectionId, Member>,
}

impl RoomMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member.
    ///
    /// A second join with the same connection id is rejected and leaves the
    /// existing entry untouched.
    pub fn join(&mut self, member: Member) -> Result<(), RoomError> {
        if self.members.contains_key(&member.connection_id) {
            return Err(RoomError::AlreadyJoined(
                member.connection_id.as_str().to_string(),
            ));
        }
        self.members.insert(member.connection_id.clone(), member);
        Ok(())
    }

    /// Remove a member. Returns `None` when it was not a member.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<Member> {
        self.members.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.members.keys().cloned().collect()
    }

    /// Members that should receive a message sent from `origin`.
    ///
    /// # Arguments
    ///
    /// * `origin` - Connection the message arrived on
    /// * `policy` - Whether `origin` itself is included
    pub fn broadcast_targets(&self, origin: &ConnectionId, policy: EchoPolicy) -> Vec<&Member> {
        self.members
            .values()
            .filter(|member| match policy {
                EchoPolicy::ExcludeSender => &member.connection_id != origin,
                EchoPolicy::IncludeSender => true,
            })
            .collect()
    }
}
