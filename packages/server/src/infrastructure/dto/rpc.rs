//! Wire shapes of the RPC surface (JSON, snake_case fields).

use serde::{Deserialize, Serialize};

/// `GetRooms` query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSearch {
    #[serde(default)]
    pub substring: String,
}

/// `Login` / `Logout` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    pub name: String,
    pub user_name: String,
}

/// Item of the `GetRooms` stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDto {
    pub name: String,
    pub user_count: u32,
}

/// Item of the `Chat` stream, in both directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub room_name: String,
    pub user_name: String,
    pub body: String,
    pub timestamp: String,
}

/// Registry state of one room (debug endpoint)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStateDto {
    pub name: String,
    pub user_count: u32,
    pub reserved: Vec<String>,
    pub bound: Vec<String>,
}

/// `Login` / `Logout` response. `status` follows HTTP status codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: u16,
    pub message: String,
}

impl AuthResponse {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const SERVICE_UNAVAILABLE: u16 = 503;

    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn logged_in() -> Self {
        Self::new(Self::CREATED, "You have been logged in :)")
    }

    pub fn room_not_found() -> Self {
        Self::new(Self::NOT_FOUND, "Room has not been found")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
