//! Room Directory: the fixed set of rooms created at startup.

use std::{collections::HashSet, sync::Arc};

use super::{
    entity::Room,
    error::{DirectoryError, ValueObjectError},
    value_object::RoomName,
};

/// Fixed, ordered set of rooms. Membership never changes after construction.
#[derive(Debug, Clone)]
pub struct RoomDirectory {
    rooms: Vec<Room>,
}

impl RoomDirectory {
    /// Build a directory from room names, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::DuplicateRoom` if a name appears twice.
    pub fn new(names: impl IntoIterator<Item = RoomName>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::new();
        let mut rooms = Vec::new();
        for name in names {
            if !seen.insert(name.clone()) {
                return Err(DirectoryError::DuplicateRoom(name.into_string()));
            }
            rooms.push(Room::new(name));
        }
        Ok(Self { rooms })
    }

    /// Build a directory of `count` rooms named `Room 0` .. `Room {count - 1}`.
    pub fn with_room_count(count: usize) -> Result<Self, ValueObjectError> {
        let names = (0..count)
            .map(|index| RoomName::new(format!("Room {index}")))
            .collect::<Result<Vec<_>, _>>()?;
        // generated names are distinct
        Ok(Self {
            rooms: names.into_iter().map(Room::new).collect(),
        })
    }

    /// Every room whose name contains `substring`, in directory order.
    ///
    /// An empty substring matches all rooms.
    pub fn search<'a>(&'a self, substring: &'a str) -> impl Iterator<Item = &'a Room> + 'a {
        self.rooms
            .iter()
            .filter(move |room| room.name.as_str().contains(substring))
    }

    /// Owning variant of [`RoomDirectory::search`] usable across tasks.
    pub fn search_owned(self: &Arc<Self>, substring: String) -> RoomMatches {
        RoomMatches {
            directory: Arc::clone(self),
            substring,
            position: 0,
        }
    }

    /// Look a room up by exact name
    pub fn find(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name.as_str() == name)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Lazy iterator over the rooms matching a substring.
///
/// Yields one room per `next` call; nothing is collected up front.
#[derive(Debug, Clone)]
pub struct RoomMatches {
    directory: Arc<RoomDirectory>,
    substring: String,
    position: usize,
}

impl Iterator for RoomMatches {
    type Item = Room;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(room) = self.directory.rooms.get(self.position) {
            self.position += 1;
            if room.name.as_str().contains(self.substring.as_str()) {
                return Some(room.clone());
            }
        }
        None
    }
}
