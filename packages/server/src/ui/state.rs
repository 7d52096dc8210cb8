//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    GetRoomStateUseCase, GetRoomsUseCase, LoginUseCase, LogoutUseCase, RelayMessageUseCase,
    ReleaseConnectionUseCase,
};

/// Shared application state
pub struct AppState {
    /// GetRoomsUseCase（ルーム一覧検索のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// LoginUseCase（ログインのユースケース）
    pub login_usecase: Arc<LoginUseCase>,
    /// LogoutUseCase（ログアウトのユースケース）
    pub logout_usecase: Arc<LogoutUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// ReleaseConnectionUseCase（ストリーム終了時の解放のユースケース）
    pub release_connection_usecase: Arc<ReleaseConnectionUseCase>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
}
