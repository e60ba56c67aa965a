//! UseCase layer.
//!
//! Orchestrates the persistence gateway and the room registry for each
//! client-facing operation.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_live_rooms;
pub mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, IngressError, SendMessageError};
pub use get_live_rooms::GetLiveRoomsUseCase;
pub use send_message::SendMessageUseCase;
