//! ルームアクターによる RoomRegistry 実装
//!
//! ## 責務
//!
//! - ルームごとに `ChatRoom` を所有する tokio タスクを起動する
//! - 予約・バインド・ファンアウト・解放をメールボックス経由で直列化する
//!
//! ## 設計ノート
//!
//! ルーム間でロックを共有しないため、異なるルームへの操作は互いにブロックしない。
//! 各リクエストは `oneshot` チャンネルで結果を受け取る（リクエスト・レスポンス型）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{
    ChatMessage, ChatRoom, ConnectionHandle, ConnectionId, EchoPolicy, RegistryError,
    RelayOutcome, Reservation, RoomDirectory, RoomName, RoomRegistry, RoomSnapshot, UserName,
};

/// メールボックスのデフォルト容量
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;

/// ルームアクターへのリクエスト
///
/// 各バリアントは結果を返すための `oneshot` 送信側を持つ。
enum RoomCommand {
    Reserve {
        user: UserName,
        respond_to: oneshot::Sender<Result<Reservation, RegistryError>>,
    },
    Relay {
        sender: ConnectionHandle,
        message: ChatMessage,
        respond_to: oneshot::Sender<Result<RelayOutcome, RegistryError>>,
    },
    Release {
        connection: ConnectionId,
        respond_to: oneshot::Sender<Vec<UserName>>,
    },
    Snapshot {
        respond_to: oneshot::Sender<RoomSnapshot>,
    },
}

/// 起動中のルームアクターへのハンドル
///
/// クローンしても同じアクターを指す。全てのハンドルが破棄されるとアクターは終了する。
#[derive(Clone)]
pub struct RoomHandle {
    name: RoomName,
    commands: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// `ChatRoom` を所有するアクターを起動し、そのハンドルを返す
    ///
    /// tokio ランタイム内から呼び出す必要がある。
    pub fn spawn(chat_room: ChatRoom, mailbox_capacity: usize) -> Self {
        let name = chat_room.room().name.clone();
        let (commands, mailbox) = mpsc::channel(mailbox_capacity.max(1));
        tokio::spawn(run_room(chat_room, mailbox));
        Self { name, commands }
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    /// アクターにリクエストを送り、結果を待つ
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> RoomCommand,
    ) -> Result<T, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.commands
            .send(build(respond_to))
            .await
            .map_err(|_| RegistryError::RoomUnavailable(self.name.to_string()))?;
        response
            .await
            .map_err(|_| RegistryError::RoomUnavailable(self.name.to_string()))
    }

    pub async fn reserve(&self, user: UserName) -> Result<Reservation, RegistryError> {
        self.request(|respond_to| RoomCommand::Reserve { user, respond_to })
            .await?
    }

    pub async fn relay(
        &self,
        sender: ConnectionHandle,
        message: ChatMessage,
    ) -> Result<RelayOutcome, RegistryError> {
        self.request(|respond_to| RoomCommand::Relay {
            sender,
            message,
            respond_to,
        })
        .await?
    }

    pub async fn release(&self, connection: ConnectionId) -> Result<Vec<UserName>, RegistryError> {
        self.request(|respond_to| RoomCommand::Release {
            connection,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<RoomSnapshot, RegistryError> {
        self.request(|respond_to| RoomCommand::Snapshot { respond_to })
            .await
    }
}

/// ルームアクターのイベントループ
///
/// メールボックスから 1 件ずつ取り出して処理するため、同一ルームの操作は常に直列に実行される。
async fn run_room(mut chat_room: ChatRoom, mut mailbox: mpsc::Receiver<RoomCommand>) {
    let name = chat_room.room().name.clone();
    tracing::debug!("Room actor '{}' started", name);

    while let Some(command) = mailbox.recv().await {
        match command {
            RoomCommand::Reserve { user, respond_to } => {
                let result = chat_room.reserve(user);
                let _ = respond_to.send(result);
            }
            RoomCommand::Relay {
                sender,
                message,
                respond_to,
            } => {
                let result = chat_room.relay(&sender, message);
                let _ = respond_to.send(result);
            }
            RoomCommand::Release {
                connection,
                respond_to,
            } => {
                let released = chat_room.release(connection);
                let _ = respond_to.send(released);
            }
            RoomCommand::Snapshot { respond_to } => {
                let _ = respond_to.send(chat_room.snapshot());
            }
        }
    }

    tracing::debug!("Room actor '{}' stopped", name);
}

/// ルームアクターの集合による RoomRegistry 実装
///
/// ルーム名の完全一致でアクターを引く。ルームの集合は起動時に固定される。
pub struct ActorRoomRegistry {
    rooms: HashMap<RoomName, RoomHandle>,
    order: Vec<RoomName>,
}

impl ActorRoomRegistry {
    /// ディレクトリの全ルームに対してアクターを起動する
    pub fn spawn(
        directory: &RoomDirectory,
        echo_policy: EchoPolicy,
        mailbox_capacity: usize,
    ) -> Self {
        let mut rooms = HashMap::with_capacity(directory.len());
        let mut order = Vec::with_capacity(directory.len());
        for room in directory.rooms() {
            let chat_room = ChatRoom::new(room.clone(), echo_policy);
            let handle = RoomHandle::spawn(chat_room, mailbox_capacity);
            order.push(room.name.clone());
            rooms.insert(room.name.clone(), handle);
        }
        tracing::info!("{} room actors started", order.len());
        Self { rooms, order }
    }

    fn room(&self, name: &RoomName) -> Result<&RoomHandle, RegistryError> {
        self.rooms
            .get(name)
            .ok_or_else(|| RegistryError::RoomNotFound(name.to_string()))
    }
}

#[async_trait]
impl RoomRegistry for ActorRoomRegistry {
    async fn reserve(
        &self,
        room: &RoomName,
        user: &UserName,
    ) -> Result<Reservation, RegistryError> {
        self.room(room)?.reserve(user.clone()).await
    }

    async fn relay(
        &self,
        sender: &ConnectionHandle,
        message: ChatMessage,
    ) -> Result<RelayOutcome, RegistryError> {
        let room = self.room(&message.room_name)?;
        room.relay(sender.clone(), message).await
    }

    async fn release(
        &self,
        room: &RoomName,
        connection: ConnectionId,
    ) -> Result<Vec<UserName>, RegistryError> {
        self.room(room)?.release(connection).await
    }

    async fn snapshot(&self, room: &RoomName) -> Result<RoomSnapshot, RegistryError> {
        self.room(room)?.snapshot().await
    }

    fn room_names(&self) -> Vec<RoomName> {
        self.order.clone()
    }
}
