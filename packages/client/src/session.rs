//! Client session state machine.
//!
//! Pure state: no I/O happens here, so every transition is unit tested.

use roomcast_server::infrastructure::dto::{AuthResponse, MessageDto};
use roomcast_shared::time::Clock;

use crate::error::ClientError;

/// Sent right after a successful login so the stream binds into the room
pub const JOINED_MESSAGE: &str = "I've joined this room. :)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    JoinedRoom(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    user_name: String,
    state: SessionState,
}

impl Session {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            state: SessionState::Idle,
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_room(&self) -> Option<&str> {
        match &self.state {
            SessionState::JoinedRoom(room) => Some(room),
            SessionState::Idle => None,
        }
    }

    /// Change the user name. Blank names are rejected and leave the session as is.
    ///
    /// Returns whether the name changed. The open stream is bound under the
    /// old name, so a change returns the session to `Idle` and the caller
    /// must close that stream.
    pub fn set_user_name(&mut self, name: &str) -> Result<bool, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Protocol(
                "user name must not be empty".to_string(),
            ));
        }
        if self.user_name == name {
            return Ok(false);
        }
        self.user_name = name.to_string();
        self.state = SessionState::Idle;
        Ok(true)
    }

    /// Apply a login response. Only 201 moves the session into the room.
    pub fn on_login(&mut self, room: &str, response: &AuthResponse) -> bool {
        if response.status == AuthResponse::CREATED {
            self.state = SessionState::JoinedRoom(room.to_string());
            true
        } else {
            false
        }
    }

    pub fn on_logout(&mut self) {
        self.state = SessionState::Idle;
    }

    pub fn on_stream_closed(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Build the outbound message for `body` in the current room
    pub fn outgoing(&self, body: &str, clock: &dyn Clock) -> Result<MessageDto, ClientError> {
        let room = self.current_room().ok_or(ClientError::NotJoined)?;
        Ok(MessageDto {
            room_name: room.to_string(),
            user_name: self.user_name.clone(),
            body: body.to_string(),
            timestamp: clock.timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use roomcast_shared::time::FixedClock;

    fn clock() -> FixedClock {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        FixedClock::new(offset.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_chat_while_idle_is_not_sent() {
        // テスト項目: 未入室の状態ではメッセージを組み立てない
        // given (前提条件):
        let session = Session::new("alice");

        // when (操作):
        let result = session.outgoing("hi", &clock());

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::NotJoined)));
    }

    #[test]
    fn test_login_created_joins_room() {
        // テスト項目: 201 のログイン応答で入室状態に遷移する
        // given (前提条件):
        let mut session = Session::new("alice");

        // when (操作):
        let joined = session.on_login("Room 3", &AuthResponse::logged_in());

        // then (期待する結果):
        assert!(joined);
        assert_eq!(session.state(), &SessionState::JoinedRoom("Room 3".to_string()));
        let message = session.outgoing(JOINED_MESSAGE, &clock()).unwrap();
        assert_eq!(message.room_name, "Room 3");
        assert_eq!(message.user_name, "alice");
        assert_eq!(message.body, "I've joined this room. :)");
        assert_eq!(message.timestamp, "Sunday, 01-Jan-23 00:00:00 +09:00");
    }

    #[test]
    fn test_login_not_found_keeps_state() {
        // テスト項目: 404 のログイン応答では状態が変わらない
        // given (前提条件):
        let mut session = Session::new("alice");
        session.on_login("Room 1", &AuthResponse::logged_in());

        // when (操作):
        let joined = session.on_login("Room 99", &AuthResponse::room_not_found());

        // then (期待する結果):
        assert!(!joined);
        assert_eq!(session.current_room(), Some("Room 1"));
    }

    #[test]
    fn test_blank_user_name_is_rejected() {
        // テスト項目: 空のユーザー名への変更は拒否される
        // given (前提条件):
        let mut session = Session::new("alice");

        // when (操作):
        let result = session.set_user_name("   ");

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(session.user_name(), "alice");
    }

    #[test]
    fn test_user_name_change_leaves_room() {
        // テスト項目: ユーザー名を変更すると未入室状態に戻る
        // given (前提条件):
        let mut session = Session::new("guest");
        session.on_login("Room 0", &AuthResponse::logged_in());

        // when (操作):
        let changed = session.set_user_name("bob").unwrap();

        // then (期待する結果):
        assert!(changed);
        assert_eq!(session.user_name(), "bob");
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_same_user_name_keeps_room() {
        // テスト項目: 同じユーザー名を指定しても入室状態は変わらない
        // given (前提条件):
        let mut session = Session::new("bob");
        session.on_login("Room 0", &AuthResponse::logged_in());

        // when (操作):
        let changed = session.set_user_name(" bob ").unwrap();

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(session.current_room(), Some("Room 0"));
    }

    #[test]
    fn test_stream_closed_returns_to_idle() {
        // テスト項目: ストリーム終了で未入室状態に戻る
        // given (前提条件):
        let mut session = Session::new("alice");
        session.on_login("Room 2", &AuthResponse::logged_in());

        // when (操作):
        session.on_stream_closed();

        // then (期待する結果):
        assert_eq!(session.state(), &SessionState::Idle);
    }
}
