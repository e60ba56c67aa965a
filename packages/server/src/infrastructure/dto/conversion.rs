//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    ValueObjectError, entity,
    value_object::{RoomId, UserId},
};
use crate::infrastructure::dto::{seed as seed_dto, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&entity::ChatMessage> for dto::ChatFrame {
    fn from(model: &entity::ChatMessage) -> Self {
        Self {
            user_id: model.user_id.as_str().to_string(),
            body: model.body.as_str().to_string(),
        }
    }
}

// ========================================
// Seed DTO → Domain Entity
// ========================================

impl TryFrom<seed_dto::SeedChatRoom> for entity::ChatRoom {
    type Error = ValueObjectError;

    fn try_from(dto: seed_dto::SeedChatRoom) -> Result<Self, Self::Error> {
        Ok(Self::new(RoomId::new(dto.id)?, dto.name))
    }
}

impl TryFrom<seed_dto::SeedUser> for entity::User {
    type Error = ValueObjectError;

    fn try_from(dto: seed_dto::SeedUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(dto.id)?,
            username: dto.username,
            first_name: dto.first_name,
            last_name: dto.last_name,
        })
    }
}
