//! UseCase: ログアウト
//!
//! ログアウトはレジストリの状態を変更しない。ストリームを閉じたときに
//! `ReleaseConnectionUseCase` によってバインドが解放される。

use crate::domain::{RoomName, UserName};

/// ログアウトで返すメッセージ
pub const LOGOUT_MESSAGE: &str = "Logout has no effect";

/// ログアウトのユースケース
#[derive(Debug, Default)]
pub struct LogoutUseCase;

impl LogoutUseCase {
    pub fn new() -> Self {
        Self
    }

    /// ログアウトを実行（常に成功し、何も変更しない）
    pub fn execute(&self, room_name: &str, user_name: &str) -> &'static str {
        match (
            RoomName::new(room_name.to_string()),
            UserName::new(user_name.to_string()),
        ) {
            (Ok(room), Ok(user)) => {
                tracing::debug!("Logout requested by '{}' for '{}'", user, room);
            }
            _ => tracing::debug!("Logout requested with an incomplete request"),
        }
        LOGOUT_MESSAGE
    }
}
