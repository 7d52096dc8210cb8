//! Value objects for the chat relay domain.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Name of a room. Identity of a room in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new room name. Blank names are rejected.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::EmptyRoomName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name a participant uses inside a room. Unique per room, may repeat across rooms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name. Blank names are rejected.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of one bidirectional chat stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_accepts_non_empty() {
        // テスト項目: 空でないルーム名は受け入れられる
        // given (前提条件):
        let raw = "Room 3".to_string();

        // when (操作):
        let result = RoomName::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Room 3");
    }

    #[test]
    fn test_room_name_rejects_blank() {
        // テスト項目: 空白のみのルーム名はエラーになる
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = RoomName::try_from(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomName));
    }

    #[test]
    fn test_user_name_rejects_empty() {
        // テスト項目: 空のユーザー名はエラーになる
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = UserName::try_from(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyUserName));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):
        let first = ConnectionId::generate();

        // when (操作):
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
