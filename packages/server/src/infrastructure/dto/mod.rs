//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! - `rpc`: request / response / stream item shapes of the four RPCs
//! - `conversion`: mapping between DTOs and domain entities

pub mod conversion;
pub mod rpc;

pub use rpc::{AuthResponse, MessageDto, RoomDto, RoomRequest, RoomSearch, RoomStateDto};
