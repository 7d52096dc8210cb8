//! Connection Registry of a single room.
//!
//! Maps each admitted user name to an optional connection handle. An entry is
//! reserved (handle absent) by a successful login and bound lazily when the
//! first chat message for the room arrives on a stream.

use std::collections::HashMap;

use serde::Deserialize;

use super::{
    connection::ConnectionHandle,
    error::RegistryError,
    value_object::{ConnectionId, RoomName, UserName},
};

/// Whether the sender of a message receives its own message back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EchoPolicy {
    #[default]
    IncludeSender,
    ExcludeSender,
}

/// Result of a reservation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    Reserved,
    AlreadyReserved,
}

/// Result of a bind request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    Bound,
    AlreadyBound,
}

#[derive(Debug)]
pub struct ConnectionRegistry {
    room: RoomName,
    entries: HashMap<UserName, Option<ConnectionHandle>>,
}

impl ConnectionRegistry {
    pub fn new(room: RoomName) -> Self {
        Self {
            room,
            entries: HashMap::new(),
        }
    }

    fn room_label(&self) -> String {
        self.room.as_str().to_string()
    }

    /// Reserve an entry for `user` with no handle attached.
    ///
    /// Reserving an unbound user again is a no-op. A user already bound to a
    /// live stream is rejected.
    pub fn reserve(&mut self, user: UserName) -> Result<Reservation, RegistryError> {
        match self.entries.get(&user) {
            Some(Some(handle)) if !handle.is_closed() => Err(RegistryError::UserAlreadyBound {
                room: self.room_label(),
                user: user.into_string(),
            }),
            Some(None) => Ok(Reservation::AlreadyReserved),
            _ => {
                self.entries.insert(user, None);
                Ok(Reservation::Reserved)
            }
        }
    }

    /// Bind `handle` to the reserved entry of `user`.
    ///
    /// A slot still holding a closed handle is taken over by the new stream.
    pub fn bind(
        &mut self,
        user: &UserName,
        handle: &ConnectionHandle,
    ) -> Result<BindOutcome, RegistryError> {
        if let Some(bound_as) = self.user_bound_to(handle.id()) {
            if bound_as == user {
                return Ok(BindOutcome::AlreadyBound);
            }
            return Err(RegistryError::ConnectionBoundToOtherUser {
                room: self.room_label(),
                user: user.as_str().to_string(),
                bound_as: bound_as.as_str().to_string(),
            });
        }

        let room = self.room_label();
        let Some(slot) = self.entries.get_mut(user) else {
            return Err(RegistryError::NotAdmitted {
                room,
                user: user.as_str().to_string(),
            });
        };
        // a closed stream that has not been released yet gives way
        if matches!(slot, Some(bound) if !bound.is_closed()) {
            return Err(RegistryError::BoundToOtherConnection {
                room,
                user: user.as_str().to_string(),
            });
        }
        *slot = Some(handle.clone());
        Ok(BindOutcome::Bound)
    }

    /// User name the given connection is bound as, if any
    pub fn user_bound_to(&self, connection: ConnectionId) -> Option<&UserName> {
        self.entries.iter().find_map(|(user, slot)| match slot {
            Some(handle) if handle.id() == connection => Some(user),
            _ => None,
        })
    }

    /// Bound handles that should receive a message from `sender`.
    pub fn recipients(
        &self,
        sender: ConnectionId,
        policy: EchoPolicy,
    ) -> impl Iterator<Item = (&UserName, &ConnectionHandle)> {
        self.entries
            .iter()
            .filter_map(|(user, slot)| slot.as_ref().map(|handle| (user, handle)))
            .filter(move |(_, handle)| {
                policy == EchoPolicy::IncludeSender || handle.id() != sender
            })
    }

    /// Remove every entry bound to `connection`. Returns the released user names.
    pub fn release(&mut self, connection: ConnectionId) -> Vec<UserName> {
        let released: Vec<UserName> = self
            .entries
            .iter()
            .filter(|(_, slot)| matches!(slot, Some(handle) if handle.id() == connection))
            .map(|(user, _)| user.clone())
            .collect();
        for user in &released {
            self.entries.remove(user);
        }
        released
    }

    /// Drop the entry of `user` entirely
    pub fn remove(&mut self, user: &UserName) -> bool {
        self.entries.remove(user).is_some()
    }

    /// Reserved user names (bound or not), sorted
    pub fn reserved_users(&self) -> Vec<UserName> {
        let mut users: Vec<UserName> = self.entries.keys().cloned().collect();
        users.sort();
        users
    }

    /// Bound user names, sorted
    pub fn bound_users(&self) -> Vec<UserName> {
        let mut users: Vec<UserName> = self
            .entries
            .iter()
            .filter(|(_, slot)| slot.is_some())
            .map(|(user, _)| user.clone())
            .collect();
        users.sort();
        users
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
