//! Outbound side of one bidirectional chat stream.
//!
//! Every stream owns a single outbound queue. The registry keeps clones of
//! the queue sender, so sends from any room actor are serialized through the
//! queue and drained by exactly one writer task.

use tokio::sync::mpsc;

use super::{entity::ChatMessage, error::MessagePushError, value_object::ConnectionId};

/// Sender half of a connection's outbound queue
pub type PusherChannel = mpsc::UnboundedSender<ChatMessage>;

/// Session handle stored in the connection registry.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: PusherChannel,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, sender: PusherChannel) -> Self {
        Self { id, sender }
    }

    /// Create a handle with a fresh id together with the receiving end of its queue.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ChatMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(ConnectionId::generate(), sender), receiver)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a message for delivery on this connection.
    ///
    /// # Errors
    ///
    /// Returns `MessagePushError::ChannelClosed` once the stream's writer has gone away.
    pub fn push(&self, message: ChatMessage) -> Result<(), MessagePushError> {
        self.sender
            .send(message)
            .map_err(|_| MessagePushError::ChannelClosed(self.id.to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
