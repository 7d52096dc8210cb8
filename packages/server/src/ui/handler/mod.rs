//! Request handlers.

mod chat;
mod http;

pub use chat::chat_handler;
pub use http::{debug_rooms, get_rooms, health_check, login, logout};
