//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and transport concerns.

pub mod chat_room;
pub mod connection;
pub mod directory;
pub mod entity;
pub mod error;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use chat_room::{ChatRoom, RelayOutcome, RoomSnapshot};
pub use connection::{ConnectionHandle, PusherChannel};
pub use directory::{RoomDirectory, RoomMatches};
pub use entity::{ChatMessage, Room};
pub use error::{DirectoryError, MessagePushError, RegistryError, ValueObjectError};
pub use registry::{BindOutcome, ConnectionRegistry, EchoPolicy, Reservation};
pub use repository::RoomRegistry;
pub use value_object::{ConnectionId, RoomName, UserName};

#[cfg(test)]
pub use repository::MockRoomRegistry;
