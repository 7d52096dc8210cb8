//! ChatRoom aggregate: one room plus its connection registry.
//!
//! All operations take `&mut self`; callers serialize access per room.

use super::{
    connection::ConnectionHandle,
    entity::{ChatMessage, Room},
    error::RegistryError,
    registry::{BindOutcome, ConnectionRegistry, EchoPolicy, Reservation},
    value_object::{ConnectionId, UserName},
};

/// What happened while relaying one message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelayOutcome {
    /// The sending stream was bound by this message
    pub newly_bound: bool,
    /// Users the message was queued for
    pub delivered: Vec<UserName>,
    /// Users whose stream had gone away; their bindings were pruned
    pub failed: Vec<UserName>,
}

/// Point-in-time view of a room's registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room: Room,
    pub reserved: Vec<UserName>,
    pub bound: Vec<UserName>,
}

#[derive(Debug)]
pub struct ChatRoom {
    room: Room,
    registry: ConnectionRegistry,
    echo_policy: EchoPolicy,
}

impl ChatRoom {
    pub fn new(room: Room, echo_policy: EchoPolicy) -> Self {
        let registry = ConnectionRegistry::new(room.name.clone());
        Self {
            room,
            registry,
            echo_policy,
        }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Admission: reserve `user` without a stream attached
    pub fn reserve(&mut self, user: UserName) -> Result<Reservation, RegistryError> {
        self.registry.reserve(user)
    }

    /// Broadcast Engine: bind the sender lazily, then fan the message out.
    ///
    /// A failed push to one recipient prunes that binding and does not stop
    /// delivery to the others.
    pub fn relay(
        &mut self,
        sender: &ConnectionHandle,
        message: ChatMessage,
    ) -> Result<RelayOutcome, RegistryError> {
        let newly_bound = self.registry.bind(&message.user_name, sender)? == BindOutcome::Bound;

        let mut outcome = RelayOutcome {
            newly_bound,
            ..RelayOutcome::default()
        };
        for (user, handle) in self.registry.recipients(sender.id(), self.echo_policy) {
            match handle.push(message.clone()) {
                Ok(()) => outcome.delivered.push(user.clone()),
                Err(e) => {
                    tracing::warn!(
                        "Failed to push message to '{}' in '{}': {}",
                        user,
                        self.room.name,
                        e
                    );
                    outcome.failed.push(user.clone());
                }
            }
        }

        for user in &outcome.failed {
            self.registry.remove(user);
        }

        Ok(outcome)
    }

    /// Release every binding held by a terminated stream
    pub fn release(&mut self, connection: ConnectionId) -> Vec<UserName> {
        self.registry.release(connection)
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room: self.room.clone(),
            reserved: self.registry.reserved_users(),
            bound: self.registry.bound_users(),
        }
    }
}
