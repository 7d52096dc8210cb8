//! Conversion logic between DTOs and domain entities.

use crate::{
    domain::{ChatMessage, Room, RoomName, RoomSnapshot, UserName, ValueObjectError},
    usecase::LoginError,
};

use super::rpc::{AuthResponse, MessageDto, RoomDto, RoomStateDto};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<MessageDto> for ChatMessage {
    type Error = ValueObjectError;

    fn try_from(dto: MessageDto) -> Result<Self, Self::Error> {
        Ok(Self::new(
            RoomName::try_from(dto.room_name)?,
            UserName::try_from(dto.user_name)?,
            dto.body,
            dto.timestamp,
        ))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            name: room.name.into_string(),
            user_count: room.user_count,
        }
    }
}

impl From<ChatMessage> for MessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            room_name: message.room_name.into_string(),
            user_name: message.user_name.into_string(),
            body: message.body,
            timestamp: message.timestamp,
        }
    }
}

impl From<RoomSnapshot> for RoomStateDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            name: snapshot.room.name.into_string(),
            user_count: snapshot.room.user_count,
            reserved: snapshot
                .reserved
                .into_iter()
                .map(UserName::into_string)
                .collect(),
            bound: snapshot.bound.into_iter().map(UserName::into_string).collect(),
        }
    }
}

// ========================================
// UseCase Error → DTO
// ========================================

impl From<&LoginError> for AuthResponse {
    fn from(error: &LoginError) -> Self {
        match error {
            LoginError::RoomNotFound(_) => Self::room_not_found(),
            LoginError::UserAlreadyBound { .. } => {
                Self::new(Self::CONFLICT, "User name already in use in this room")
            }
            LoginError::InvalidRequest(e) => Self::new(Self::BAD_REQUEST, e.to_string()),
            LoginError::RoomUnavailable(_) => {
                Self::new(Self::SERVICE_UNAVAILABLE, error.to_string())
            }
        }
    }
}
