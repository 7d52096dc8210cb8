//! WebSocket handler for the bidirectional `Chat` stream.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};

use crate::{
    domain::{ChatMessage, ConnectionHandle, RoomName},
    infrastructure::dto::MessageDto,
    ui::state::AppState,
    usecase::RelayError,
};

pub async fn chat_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns the single writer of this stream.
///
/// Messages queued by the room actors (via the rx channel) are written to the
/// WebSocket in queue order, so concurrent fan-outs never interleave a frame.
/// The write half is handed back when the loop ends so the caller decides
/// when the socket is dropped.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<ChatMessage>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<SplitSink<WebSocket, Message>> {
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match serde_json::to_string(&MessageDto::from(message)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize outbound message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        sender
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (handle, rx) = ConnectionHandle::channel();
    let connection = handle.id();
    tracing::info!("Chat stream {} opened", connection);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    // Rooms this stream may be bound in, released when the stream ends
    let bound_rooms: Arc<Mutex<HashSet<RoomName>>> = Arc::new(Mutex::new(HashSet::new()));

    let state_clone = state.clone();
    let bound_rooms_clone = bound_rooms.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("WebSocket error on stream {}: {}", handle.id(), e);
                    break;
                }
            };

            match frame {
                Message::Text(text) => {
                    relay_frame(&state_clone, &handle, &bound_rooms_clone, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::debug!("Stream {} sent close frame", handle.id());
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks exits, stop the reader. The writer keeps the
    // socket open until the bindings are released.
    let mut write_half = None;
    tokio::select! {
        result = &mut send_task => {
            write_half = result.ok();
            recv_task.abort();
            let _ = (&mut recv_task).await;
        }
        _ = &mut recv_task => {}
    }

    let rooms: Vec<RoomName> = bound_rooms.lock().await.drain().collect();
    state
        .release_connection_usecase
        .execute(rooms, connection)
        .await;

    send_task.abort();
    drop(write_half);
    tracing::info!("Chat stream {} closed", connection);
}

/// Decode one inbound frame and relay it.
///
/// The room is recorded before the relay is awaited, so a stream torn down
/// mid-relay still releases it. Malformed frames and rejected messages are
/// logged and skipped.
async fn relay_frame(
    state: &AppState,
    handle: &ConnectionHandle,
    bound_rooms: &Mutex<HashSet<RoomName>>,
    text: &str,
) {
    let dto: MessageDto = match serde_json::from_str(text) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::warn!("Malformed chat frame on stream {}: {}", handle.id(), e);
            return;
        }
    };
    let message = match ChatMessage::try_from(dto) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Invalid chat message on stream {}: {}", handle.id(), e);
            return;
        }
    };

    let room = message.room_name.clone();
    bound_rooms.lock().await.insert(room.clone());
    match state.relay_message_usecase.execute(handle, message).await {
        Ok(_) => {}
        Err(RelayError::RoomNotFound(name)) => {
            bound_rooms.lock().await.remove(&room);
            tracing::warn!("Message for unknown room '{}' dropped", name);
        }
        Err(e) => {
            tracing::warn!("Message on stream {} dropped: {}", handle.id(), e);
        }
    }
}
