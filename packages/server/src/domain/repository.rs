//! RoomRegistry trait 定義
//!
//! ドメイン層が必要とする「ルームごとの接続レジストリ」へのインターフェースを定義します。
//! 具体的な実装（ルームごとのアクター）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, ConnectionHandle, ConnectionId, RegistryError, RelayOutcome, Reservation,
    RoomName, RoomSnapshot, UserName,
};

/// Room Registry trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
/// 実装は同一ルームに対する操作（予約・バインド・ファンアウト・解放）を直列化しなければならない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// ユーザーの入室枠を予約する（ストリーム未接続）
    async fn reserve(&self, room: &RoomName, user: &UserName)
    -> Result<Reservation, RegistryError>;

    /// メッセージの送信元ストリームを遅延バインドし、ルーム内の全バインド先へ配信する
    async fn relay(
        &self,
        sender: &ConnectionHandle,
        message: ChatMessage,
    ) -> Result<RelayOutcome, RegistryError>;

    /// 終了したストリームが保持するバインドを解放する
    async fn release(
        &self,
        room: &RoomName,
        connection: ConnectionId,
    ) -> Result<Vec<UserName>, RegistryError>;

    /// ルームのレジストリの状態を取得する
    async fn snapshot(&self, room: &RoomName) -> Result<RoomSnapshot, RegistryError>;

    /// 管理している全ルーム名（ディレクトリ順）
    fn room_names(&self) -> Vec<RoomName>;
}
