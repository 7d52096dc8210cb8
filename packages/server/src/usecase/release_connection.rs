//! UseCase: ストリーム終了時の解放処理

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomName, RoomRegistry, UserName};

/// ストリーム終了時にバインドを解放するユースケース
pub struct ReleaseConnectionUseCase {
    /// RoomRegistry（ルームごとの接続レジストリの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl ReleaseConnectionUseCase {
    /// 新しい ReleaseConnectionUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ストリームがバインドされていた各ルームからバインドを解放する
    ///
    /// 解放に失敗したルームはログに記録して次のルームへ進む。
    ///
    /// # Returns
    ///
    /// ルームごとに解放されたユーザー名
    pub async fn execute(
        &self,
        rooms: impl IntoIterator<Item = RoomName>,
        connection: ConnectionId,
    ) -> Vec<(RoomName, Vec<UserName>)> {
        let mut released = Vec::new();
        for room in rooms {
            match self.registry.release(&room, connection).await {
                Ok(users) => {
                    for user in &users {
                        tracing::info!("User '{}' left '{}'", user, room);
                    }
                    released.push((room, users));
                }
                Err(e) => tracing::warn!("Failed to release stream {}: {}", connection, e),
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockRoomRegistry, RegistryError};

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_release_every_bound_room() {
        // テスト項目: ストリームがバインドされていた全ルームで解放が行われる
        // given (前提条件):
        let connection = ConnectionId::generate();
        let mut registry = MockRoomRegistry::new();
        registry
            .expect_release()
            .withf(move |_, id| *id == connection)
            .times(2)
            .returning(|_, _| Ok(vec![UserName::new("alice".to_string()).unwrap()]));
        let usecase = ReleaseConnectionUseCase::new(Arc::new(registry));

        // when (操作):
        let released = usecase
            .execute(vec![room("Room 0"), room("Room 1")], connection)
            .await;

        // then (期待する結果):
        assert_eq!(released.len(), 2);
        assert_eq!(released[0].0, room("Room 0"));
        assert_eq!(released[1].1[0].as_str(), "alice");
    }

    #[tokio::test]
    async fn test_release_continues_after_failure() {
        // テスト項目: 1 つのルームで解放に失敗しても残りのルームの解放は続行される
        // given (前提条件):
        let mut registry = MockRoomRegistry::new();
        registry.expect_release().returning(|room, _| {
            if room.as_str() == "Room 0" {
                Err(RegistryError::RoomUnavailable(room.to_string()))
            } else {
                Ok(Vec::new())
            }
        });
        let usecase = ReleaseConnectionUseCase::new(Arc::new(registry));

        // when (操作):
        let released = usecase
            .execute(vec![room("Room 0"), room("Room 1")], ConnectionId::generate())
            .await;

        // then (期待する結果):
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].0, room("Room 1"));
    }
}
