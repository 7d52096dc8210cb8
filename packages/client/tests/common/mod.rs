//! Helpers shared by the end-to-end tests.

#![allow(dead_code)]

use std::{fs, path::PathBuf, time::Duration};

use roomcast_client::rpc::{ChatReceiver, ChatSender, RoomcastClient};
use roomcast_server::{
    config::ServerConfig,
    infrastructure::dto::{MessageDto, RoomStateDto},
    ui::{Server, tls::load_server_config},
};
use tokio::{net::TcpListener, sync::oneshot, time::timeout};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Test server handle. Dropping it shuts the server down.
pub struct TestServer {
    pub url: String,
    /// CA file trusted by clients of a TLS server
    pub ca_file: Option<PathBuf>,
    _shutdown: oneshot::Sender<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(path) = &self.ca_file {
            fs::remove_file(path).ok();
        }
    }
}

pub async fn start_server(config: ServerConfig) -> TestServer {
    let server = Server::from_config(&config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(server.serve(listener, async {
        shutdown_rx.await.ok();
    }));
    TestServer {
        url: format!("http://{addr}"),
        ca_file: None,
        _shutdown: shutdown_tx,
    }
}

/// Start a TLS server with a fresh self-signed certificate for 127.0.0.1
pub async fn start_tls_server(config: ServerConfig) -> TestServer {
    let generated =
        rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string(), "localhost".to_string()])
            .unwrap();
    let id = unique_suffix();
    let cert_file = std::env::temp_dir().join(format!("roomcast-cert-{id}.pem"));
    let key_file = std::env::temp_dir().join(format!("roomcast-key-{id}.pem"));
    fs::write(&cert_file, generated.cert.pem()).unwrap();
    fs::write(&key_file, generated.key_pair.serialize_pem()).unwrap();
    let tls = load_server_config(&cert_file, &key_file).unwrap();
    fs::remove_file(&key_file).unwrap();

    let server = Server::from_config(&config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(server.serve_tls(listener, tls, async {
        shutdown_rx.await.ok();
    }));
    TestServer {
        url: format!("https://{addr}"),
        ca_file: Some(cert_file),
        _shutdown: shutdown_tx,
    }
}

fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", std::process::id(), nanos)
}

pub fn message(room: &str, user: &str, body: &str) -> MessageDto {
    MessageDto {
        room_name: room.to_string(),
        user_name: user.to_string(),
        body: body.to_string(),
        timestamp: "Sunday, 01-Jan-23 00:00:00 +09:00".to_string(),
    }
}

pub async fn recv(receiver: &mut ChatReceiver) -> MessageDto {
    timeout(TIMEOUT, receiver.next_message())
        .await
        .expect("timed out waiting for a message")
        .expect("chat stream ended")
        .expect("malformed chat frame")
}

/// Log in, open a stream and bind it by sending the join message
pub async fn join(
    client: &RoomcastClient,
    room: &str,
    user: &str,
) -> (ChatSender, ChatReceiver) {
    let response = client.login(room, user).await.unwrap();
    assert_eq!(response.status, 201);
    let (mut sender, mut receiver) = client.connect_chat().await.unwrap();
    sender
        .send(&message(room, user, "I've joined this room. :)"))
        .await
        .unwrap();
    // own echo proves the stream is bound
    let echo = recv(&mut receiver).await;
    assert_eq!(echo.user_name, user);
    (sender, receiver)
}

/// Snapshot of one room from `/debug/rooms`
pub async fn room_state(server: &TestServer, room: &str) -> RoomStateDto {
    let client = match &server.ca_file {
        Some(ca_file) => {
            let pem = fs::read(ca_file).unwrap();
            reqwest::Client::builder()
                .add_root_certificate(reqwest::Certificate::from_pem(&pem).unwrap())
                .build()
                .unwrap()
        }
        None => reqwest::Client::new(),
    };
    let states: Vec<RoomStateDto> = client
        .get(format!("{}/debug/rooms", server.url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    states
        .into_iter()
        .find(|state| state.name == room)
        .expect("room missing from debug snapshot")
}
