//! Domain entities.

use serde::Serialize;

use super::value_object::{RoomName, UserName};

/// A named channel grouping chat participants.
///
/// Immutable after creation; `user_count` is not maintained live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub name: RoomName,
    pub user_count: u32,
}

impl Room {
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            user_count: 0,
        }
    }
}

/// A chat message as sent by a client. Immutable once sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub room_name: RoomName,
    pub user_name: UserName,
    pub body: String,
    /// Human-readable time from the sender's local clock
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(room_name: RoomName, user_name: UserName, body: String, timestamp: String) -> Self {
        Self {
            room_name,
            user_name,
            body,
            timestamp,
        }
    }
}
