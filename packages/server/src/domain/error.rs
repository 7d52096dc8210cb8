//! Domain error types.

use thiserror::Error;

/// Errors raised while constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("user name must not be empty")]
    EmptyUserName,
}

/// Errors raised while building the room directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("room '{0}' is defined more than once")]
    DuplicateRoom(String),
}

/// Errors raised by the connection registry of a room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("room '{0}' has not been found")]
    RoomNotFound(String),

    #[error("user '{user}' is already in use in room '{room}'")]
    UserAlreadyBound { room: String, user: String },

    #[error("user '{user}' has not logged in to room '{room}'")]
    NotAdmitted { room: String, user: String },

    #[error("user '{user}' in room '{room}' is bound to another stream")]
    BoundToOtherConnection { room: String, user: String },

    #[error("stream already speaks as '{bound_as}' in room '{room}', not as '{user}'")]
    ConnectionBoundToOtherUser {
        room: String,
        user: String,
        bound_as: String,
    },

    #[error("room '{0}' is not accepting requests")]
    RoomUnavailable(String),
}

/// Errors raised when pushing a message to one connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("outbound queue of connection {0} is closed")]
    ChannelClosed(String),
}
