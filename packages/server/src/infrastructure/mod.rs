//! Infrastructure layer.
//!
//! Wire DTOs, the persistence gateway implementation and the live room
//! registry.

pub mod dto;
pub mod repository;
pub mod room;
