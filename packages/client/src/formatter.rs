//! Message formatting utilities for client display.

use roomcast_server::infrastructure::dto::{AuthResponse, MessageDto, RoomDto};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a relayed chat message
    pub fn format_chat_message(message: &MessageDto) -> String {
        format!(
            "MESSAGE [{}]: {}: {}",
            message.timestamp, message.user_name, message.body
        )
    }

    /// Format one room of a `get_rooms` result
    pub fn format_room(room: &RoomDto) -> String {
        room.name.clone()
    }

    /// Format a login / logout response
    pub fn format_auth_response(response: &AuthResponse) -> String {
        format!("[{}] {}", response.status, response.message)
    }

    pub fn format_connection_established(room: &str) -> String {
        format!("Connection with '{}' is established! :)", room)
    }

    pub fn format_user_name_changed(user_name: &str) -> String {
        format!("You are now registered as '{}'", user_name)
    }
}
