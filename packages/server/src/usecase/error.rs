//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RegistryError, ValueObjectError};

/// ログイン処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Invalid login request: {0}")]
    InvalidRequest(#[from] ValueObjectError),
    #[error("Room '{0}' has not been found")]
    RoomNotFound(String),
    #[error("User '{user}' is already connected to '{room}'")]
    UserAlreadyBound { room: String, user: String },
    #[error("Room '{0}' is unavailable")]
    RoomUnavailable(String),
}

impl From<RegistryError> for LoginError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::RoomNotFound(room) => Self::RoomNotFound(room),
            RegistryError::UserAlreadyBound { room, user } => Self::UserAlreadyBound { room, user },
            // reserve only fails with the variants above or an unavailable room
            RegistryError::NotAdmitted { room, .. }
            | RegistryError::BoundToOtherConnection { room, .. }
            | RegistryError::ConnectionBoundToOtherUser { room, .. }
            | RegistryError::RoomUnavailable(room) => Self::RoomUnavailable(room),
        }
    }
}

/// メッセージ中継処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// 宛先ルームが存在しない（ルーティングミス）
    #[error("Room '{0}' has not been found")]
    RoomNotFound(String),
    /// 送信元ストリームのバインドが拒否された
    #[error(transparent)]
    Rejected(RegistryError),
    #[error("Room '{0}' is unavailable")]
    RoomUnavailable(String),
}

impl From<RegistryError> for RelayError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::RoomNotFound(room) => Self::RoomNotFound(room),
            RegistryError::RoomUnavailable(room) => Self::RoomUnavailable(room),
            other => Self::Rejected(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_from_registry_error() {
        // テスト項目: RegistryError が LoginError の対応するバリアントに変換される
        // given (前提条件):
        let not_found = RegistryError::RoomNotFound("Room 9".to_string());
        let conflict = RegistryError::UserAlreadyBound {
            room: "Room 1".to_string(),
            user: "alice".to_string(),
        };

        // when (操作):
        let not_found = LoginError::from(not_found);
        let conflict = LoginError::from(conflict);

        // then (期待する結果):
        assert_eq!(not_found, LoginError::RoomNotFound("Room 9".to_string()));
        assert_eq!(
            conflict,
            LoginError::UserAlreadyBound {
                room: "Room 1".to_string(),
                user: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_relay_error_keeps_rejection_detail() {
        // テスト項目: バインド拒否は RelayError::Rejected として元のエラーを保持する
        // given (前提条件):
        let rejected = RegistryError::NotAdmitted {
            room: "Room 2".to_string(),
            user: "mallory".to_string(),
        };

        // when (操作):
        let error = RelayError::from(rejected.clone());

        // then (期待する結果):
        assert_eq!(error, RelayError::Rejected(rejected));
    }
}
