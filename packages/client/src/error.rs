//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket connection or frame error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Trust roots could not be loaded
    #[error("TLS error: {0}")]
    Tls(String),

    /// The server sent something the client cannot understand
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Chat text was entered before joining a room
    #[error("You have not joined a room yet")]
    NotJoined,

    /// The chat stream has ended
    #[error("Chat stream closed")]
    StreamClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
