//! Room の dispatch ループ
//!
//! ## 責務
//!
//! - Room ごとに 1 つだけ起動されるタスクが、メンバー集合を単独で所有する
//! - join / leave / dispatch は全てコマンドとしてキューに積まれ、到着順に処理される
//! - 書き込みに失敗した（または詰まった）メンバーを退出させる
//!
//! ## 設計ノート
//!
//! メンバー集合に触れるのはこのタスクだけなので、Room 内部にロックは存在しない。
//! キューが FIFO であることが、Room 内のメッセージ順序の保証そのものになる。

use std::sync::Arc;

use tokio::sync::{
    mpsc::{self, error::SendTimeoutError},
    oneshot,
};

use crate::{
    domain::{
        ChatMessage, ConnectionId, Member, MemberChannel, RoomError, RoomId, RoomMembers,
        RoomSettings, Timestamp,
    },
    infrastructure::dto::websocket::ChatFrame,
};

use super::occupancy::Occupancy;

/// Commands accepted by a room's dispatch task.
#[derive(Debug)]
enum RoomCommand {
    Join {
        member: Member,
        ack: oneshot::Sender<Result<(), RoomError>>,
    },
    Leave {
        connection_id: ConnectionId,
        ack: oneshot::Sender<bool>,
    },
    Dispatch {
        origin: ConnectionId,
        message: ChatMessage,
    },
    Members {
        ack: oneshot::Sender<Vec<ConnectionId>>,
    },
}

/// Cloneable handle to one room.
///
/// Every clone talks to the same dispatch task. The task stops once the
/// room is closed and the last handle is dropped.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    created_at: Timestamp,
    commands: mpsc::Sender<RoomCommand>,
    occupancy: Arc<Occupancy>,
}

impl RoomHandle {
    /// Create a room and start its dispatch task.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(room_id: RoomId, created_at: Timestamp, settings: RoomSettings) -> Self {
        let (commands, receiver) = mpsc::channel(settings.queue_capacity.max(1));
        let occupancy = Arc::new(Occupancy::default());

        let dispatcher = Dispatcher {
            room_id: room_id.clone(),
            members: RoomMembers::new(),
            settings,
            occupancy: occupancy.clone(),
        };
        tokio::spawn(dispatcher.run(receiver));

        Self {
            room_id,
            created_at,
            commands,
            occupancy,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Connections that joined (or are joining) and have not left yet.
    pub fn member_count(&self) -> usize {
        self.occupancy.current()
    }

    /// Whether the room stopped accepting members.
    pub fn is_closed(&self) -> bool {
        self.occupancy.is_closed() || self.commands.is_closed()
    }

    /// Whether both handles point at the same room instance.
    pub fn is_same_room(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.occupancy, &other.occupancy)
    }

    /// Close the room if it has no members. Only the registry calls this,
    /// while holding its map lock.
    pub(crate) fn try_close(&self) -> bool {
        self.occupancy.try_close()
    }

    /// Add a member and wait until the dispatch task has recorded it.
    ///
    /// # Errors
    ///
    /// * `RoomError::Closed` - the room was torn down; get a fresh handle from the registry
    /// * `RoomError::AlreadyJoined` - the connection is already a member
    pub async fn join(&self, member: Member) -> Result<(), RoomError> {
        if !self.occupancy.try_reserve() {
            return Err(self.closed());
        }

        let (ack, joined) = oneshot::channel();
        if self
            .commands
            .send(RoomCommand::Join { member, ack })
            .await
            .is_err()
        {
            self.occupancy.release();
            return Err(self.closed());
        }

        joined.await.unwrap_or_else(|_| Err(self.closed()))
    }

    /// Remove a member. Returns `false` if it was not a member; never fails.
    pub async fn leave(&self, connection_id: &ConnectionId) -> bool {
        let (ack, left) = oneshot::channel();
        let command = RoomCommand::Leave {
            connection_id: connection_id.clone(),
            ack,
        };
        if self.commands.send(command).await.is_err() {
            return false;
        }
        left.await.unwrap_or(false)
    }

    /// Queue a message for fan-out. Waits while the room's queue is full.
    pub async fn dispatch(
        &self,
        origin: &ConnectionId,
        message: ChatMessage,
    ) -> Result<(), RoomError> {
        if self.occupancy.is_closed() {
            return Err(self.closed());
        }
        let command = RoomCommand::Dispatch {
            origin: origin.clone(),
            message,
        };
        self.commands.send(command).await.map_err(|_| self.closed())
    }

    /// Current member ids, as seen by the dispatch task.
    pub async fn member_ids(&self) -> Vec<ConnectionId> {
        let (ack, members) = oneshot::channel();
        if self
            .commands
            .send(RoomCommand::Members { ack })
            .await
            .is_err()
        {
            return Vec::new();
        }
        members.await.unwrap_or_default()
    }

    fn closed(&self) -> RoomError {
        RoomError::Closed(self.room_id.as_str().to_string())
    }
}

/// State owned by the dispatch task.
struct Dispatcher {
    room_id: RoomId,
    members: RoomMembers,
    settings: RoomSettings,
    occupancy: Arc<Occupancy>,
}

impl Dispatcher {
    async fn run(mut self, mut commands: mpsc::Receiver<RoomCommand>) {
        tracing::debug!(room_id = %self.room_id, "Dispatch loop started");

        while let Some(command) = commands.recv().await {
            match command {
                RoomCommand::Join { member, ack } => {
                    let _ = ack.send(self.join(member));
                }
                RoomCommand::Leave { connection_id, ack } => {
                    let _ = ack.send(self.leave(&connection_id));
                }
                RoomCommand::Dispatch { origin, message } => {
                    self.fan_out(&origin, &message).await;
                }
                RoomCommand::Members { ack } => {
                    let _ = ack.send(self.members.connection_ids());
                }
            }
        }

        tracing::debug!(room_id = %self.room_id, "Dispatch loop stopped");
    }

    fn join(&mut self, member: Member) -> Result<(), RoomError> {
        let connection_id = member.connection_id.clone();
        match self.members.join(member) {
            Ok(()) => {
                tracing::info!(
                    room_id = %self.room_id,
                    connection_id = %connection_id,
                    members = self.members.len(),
                    "Member joined"
                );
                Ok(())
            }
            Err(e) => {
                // the reservation taken by RoomHandle::join is not backed by a member
                self.occupancy.release();
                tracing::warn!(room_id = %self.room_id, "Rejected join: {}", e);
                Err(e)
            }
        }
    }

    fn leave(&mut self, connection_id: &ConnectionId) -> bool {
        if self.members.leave(connection_id).is_none() {
            tracing::debug!(
                room_id = %self.room_id,
                connection_id = %connection_id,
                "Leave for a connection that is not a member, ignoring"
            );
            return false;
        }

        self.occupancy.release();
        tracing::info!(
            room_id = %self.room_id,
            connection_id = %connection_id,
            members = self.members.len(),
            "Member left"
        );
        true
    }

    /// Deliver one message to every target.
    ///
    /// Each write waits at most `write_timeout`. A member that times out or
    /// whose queue is closed is removed after the loop; removing it drops the
    /// room's sender, which closes that connection.
    async fn fan_out(&mut self, origin: &ConnectionId, message: &ChatMessage) {
        if message.room_id != self.room_id {
            tracing::warn!(
                room_id = %self.room_id,
                message_room_id = %message.room_id,
                "Dropping message addressed to another room"
            );
            return;
        }
        if self.members.is_empty() {
            return;
        }

        let frame = match serde_json::to_string(&ChatFrame::from(message)) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(room_id = %self.room_id, "Failed to encode frame: {}", e);
                return;
            }
        };

        let targets: Vec<(ConnectionId, MemberChannel)> = self
            .members
            .broadcast_targets(origin, self.settings.echo_policy)
            .into_iter()
            .map(|member| (member.connection_id.clone(), member.outbound.clone()))
            .collect();

        let mut evicted = Vec::new();
        for (connection_id, outbound) in targets {
            match outbound
                .send_timeout(frame.clone(), self.settings.write_timeout)
                .await
            {
                Ok(()) => {
                    tracing::trace!(connection_id = %connection_id, "Delivered message");
                }
                Err(SendTimeoutError::Timeout(_)) => {
                    tracing::warn!(
                        room_id = %self.room_id,
                        connection_id = %connection_id,
                        "Slow consumer, dropping member"
                    );
                    evicted.push(connection_id);
                }
                Err(SendTimeoutError::Closed(_)) => {
                    tracing::warn!(
                        room_id = %self.room_id,
                        connection_id = %connection_id,
                        "Outbound channel closed, dropping member"
                    );
                    evicted.push(connection_id);
                }
            }
        }

        for connection_id in evicted {
            self.leave(&connection_id);
        }
    }
}
