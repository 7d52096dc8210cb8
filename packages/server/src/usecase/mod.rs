//! UseCase 層
//!
//! UI 層（HTTP / WebSocket ハンドラ）から呼び出されるアプリケーションのユースケースを定義します。
//! ドメイン層の trait（`RoomRegistry`）にのみ依存し、具体的な実装には依存しません。

pub mod error;
pub mod get_room_state;
pub mod get_rooms;
pub mod login;
pub mod logout;
pub mod relay_message;
pub mod release_connection;

pub use error::{LoginError, RelayError};
pub use get_room_state::GetRoomStateUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use relay_message::RelayMessageUseCase;
pub use release_connection::ReleaseConnectionUseCase;
