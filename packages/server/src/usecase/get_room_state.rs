//! UseCase: ルームの状態取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{RegistryError, RoomRegistry, RoomSnapshot};

/// ルームの状態取得のユースケース
pub struct GetRoomStateUseCase {
    /// RoomRegistry（ルームごとの接続レジストリの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomStateUseCase {
    /// 新しい GetRoomStateUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 全ルームのレジストリの状態をディレクトリ順に取得する
    pub async fn execute(&self) -> Result<Vec<RoomSnapshot>, RegistryError> {
        let mut snapshots = Vec::new();
        for room in self.registry.room_names() {
            snapshots.push(self.registry.snapshot(&room).await?);
        }
        Ok(snapshots)
    }
}
