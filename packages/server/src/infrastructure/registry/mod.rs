//! RoomRegistry の実装
//!
//! ## 実装
//!
//! - `actor`: ルームごとに 1 つの tokio タスク（アクター）がレジストリを所有する実装

pub mod actor;

pub use actor::{ActorRoomRegistry, DEFAULT_MAILBOX_CAPACITY, RoomHandle};
