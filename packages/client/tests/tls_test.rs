//! End-to-end tests over HTTPS and `wss`.

mod common;

use common::{join, message, recv, room_state, start_tls_server};
use roomcast_client::{error::ClientError, rpc::RoomcastClient};
use roomcast_server::config::ServerConfig;

#[tokio::test]
async fn test_chat_over_tls() {
    // テスト項目: CA ファイルを指定すると TLS 越しにルーム検索とチャットができる
    // given (前提条件):
    let server = start_tls_server(ServerConfig::default()).await;
    let client = RoomcastClient::with_ca_file(&server.url, server.ca_file.as_deref()).unwrap();

    // when (操作):
    let rooms = client.get_rooms("Room 1").await.unwrap();
    let (_alice_tx, mut alice_rx) = join(&client, "Room 1", "alice").await;
    let (mut bob_tx, _bob_rx) = join(&client, "Room 1", "bob").await;
    bob_tx
        .send(&message("Room 1", "bob", "over tls"))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(rooms.len(), 1);
    assert_eq!(recv(&mut alice_rx).await.user_name, "bob");
    assert_eq!(recv(&mut alice_rx).await.body, "over tls");
    assert_eq!(room_state(&server, "Room 1").await.bound, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_untrusted_certificate_is_rejected() {
    // テスト項目: CA を指定しなければ自己署名証明書のサーバーには接続できない
    // given (前提条件):
    let server = start_tls_server(ServerConfig::default()).await;
    let client = RoomcastClient::new(&server.url).unwrap();

    // when (操作):
    let rooms = client.get_rooms("").await;
    let chat = client.connect_chat().await;

    // then (期待する結果):
    assert!(matches!(rooms, Err(ClientError::Http(_))));
    assert!(matches!(chat, Err(ClientError::WebSocket(_))));
}
