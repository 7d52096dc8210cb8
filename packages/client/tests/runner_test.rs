//! Runner tests: commands driven against a live server.

mod common;

use axum::{
    Json, Router,
    extract::ws::WebSocketUpgrade,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use common::{TIMEOUT, join, recv, room_state, start_server};
use roomcast_client::{
    command::Command,
    rpc::RoomcastClient,
    runner::Runner,
    session::{JOINED_MESSAGE, SessionState},
};
use roomcast_server::{config::ServerConfig, infrastructure::dto::AuthResponse};
use roomcast_shared::time::SystemClock;
use tokio::{net::TcpListener, time::timeout};

/// Server that accepts every login and hangs up each chat stream after its first frame
async fn start_hanging_up_server() -> String {
    async fn login() -> (StatusCode, Json<AuthResponse>) {
        (StatusCode::CREATED, Json(AuthResponse::logged_in()))
    }

    async fn chat(ws: WebSocketUpgrade) -> impl IntoResponse {
        ws.on_upgrade(|mut socket| async move {
            let _ = socket.recv().await;
        })
    }

    let app = Router::new()
        .route("/api/login", post(login))
        .route("/ws/chat", get(chat));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_user_name_change_then_login_speaks_as_new_name() {
    // テスト項目: ユーザー名変更後の再ログインでは新しい名前でメッセージが届く
    // given (前提条件):
    let server = start_server(ServerConfig::default()).await;
    let client = RoomcastClient::new(&server.url).unwrap();
    let (_bob_tx, mut bob_rx) = join(&client, "Room 3", "bob").await;
    let (mut runner, _closed_rx) = Runner::new(client, "alice", Box::new(SystemClock));
    runner
        .handle(Command::Login("Room 3".to_string()))
        .await
        .unwrap();
    assert_eq!(recv(&mut bob_rx).await.user_name, "alice");

    // when (操作):
    runner
        .handle(Command::UserName("carol".to_string()))
        .await
        .unwrap();
    runner
        .handle(Command::Login("Room 3".to_string()))
        .await
        .unwrap();
    runner
        .handle(Command::Chat("hello from carol".to_string()))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(runner.streaming_as(), Some("carol"));
    let carol_joined = recv(&mut bob_rx).await;
    assert_eq!(carol_joined.user_name, "carol");
    assert_eq!(carol_joined.body, JOINED_MESSAGE);
    let chat = recv(&mut bob_rx).await;
    assert_eq!(chat.user_name, "carol");
    assert_eq!(chat.body, "hello from carol");

    let state = room_state(&server, "Room 3").await;
    assert_eq!(state.bound, vec!["bob", "carol"]);
    assert_eq!(state.reserved, vec!["bob", "carol"]);
}

#[tokio::test]
async fn test_logout_then_login_again_is_created() {
    // テスト項目: ログアウト後に同じ名前で再ログインすると 201 で入室できる
    // given (前提条件):
    let server = start_server(ServerConfig::default()).await;
    let client = RoomcastClient::new(&server.url).unwrap();
    let (_bob_tx, mut bob_rx) = join(&client, "Room 2", "bob").await;
    let (mut runner, _closed_rx) = Runner::new(client, "alice", Box::new(SystemClock));
    runner
        .handle(Command::Login("Room 2".to_string()))
        .await
        .unwrap();
    assert_eq!(recv(&mut bob_rx).await.user_name, "alice");

    // when (操作):
    runner.handle(Command::Logout).await.unwrap();

    // then (期待する結果):
    assert_eq!(runner.session().state(), &SessionState::Idle);
    assert_eq!(runner.streaming_as(), None);
    assert_eq!(room_state(&server, "Room 2").await.bound, vec!["bob"]);

    // when (操作):
    runner
        .handle(Command::Login("Room 2".to_string()))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(runner.session().current_room(), Some("Room 2"));
    let rejoined = recv(&mut bob_rx).await;
    assert_eq!(rejoined.user_name, "alice");
    assert_eq!(rejoined.body, JOINED_MESSAGE);
    assert_eq!(room_state(&server, "Room 2").await.bound, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_stream_closed_by_server_returns_to_idle() {
    // テスト項目: サーバーがストリームを切断すると未入室に戻り、再ログインで新しいストリームを開く
    // given (前提条件):
    let url = start_hanging_up_server().await;
    let client = RoomcastClient::new(&url).unwrap();
    let (mut runner, mut closed_rx) = Runner::new(client, "alice", Box::new(SystemClock));
    runner
        .handle(Command::Login("Room 0".to_string()))
        .await
        .unwrap();
    let generation = timeout(TIMEOUT, closed_rx.recv())
        .await
        .expect("stream did not close")
        .unwrap();

    // when (操作):
    let reset = runner.on_stream_closed(generation).await;

    // then (期待する結果):
    assert!(reset);
    assert_eq!(runner.session().state(), &SessionState::Idle);
    assert_eq!(runner.streaming_as(), None);

    // when (操作):
    runner
        .handle(Command::Login("Room 0".to_string()))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(runner.session().current_room(), Some("Room 0"));
    assert_eq!(runner.streaming_as(), Some("alice"));
    // the first stream's signal no longer applies
    assert!(!runner.on_stream_closed(generation).await);
    assert_eq!(runner.session().current_room(), Some("Room 0"));
}
