//! RPC client for the chat relay server.
//!
//! `GetRooms`, `Login` and `Logout` go over HTTP; `Chat` is a WebSocket stream.

use std::{path::Path, sync::Arc};

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use reqwest::Url;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    Connector, MaybeTlsStream, WebSocketStream, connect_async, connect_async_tls_with_config,
    tungstenite::protocol::Message,
};

use roomcast_server::infrastructure::dto::{
    AuthResponse, MessageDto, RoomDto, RoomRequest, RoomSearch,
};

use crate::{
    error::ClientError,
    tls::{client_config, load_ca_certificates},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// HTTP side of the RPC surface
#[derive(Debug, Clone)]
pub struct RoomcastClient {
    http: reqwest::Client,
    base_url: Url,
    /// Set for `https` servers; used for the `wss` chat stream
    ws_tls: Option<Arc<rustls::ClientConfig>>,
}

impl RoomcastClient {
    /// `server_url` is the HTTP base URL, e.g. `http://127.0.0.1:10000`
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_ca_file(server_url, None)
    }

    /// Like [`RoomcastClient::new`], additionally trusting the PEM certificates in
    /// `ca_file`. An `https` URL switches both HTTP and the chat stream to TLS.
    pub fn with_ca_file(server_url: &str, ca_file: Option<&Path>) -> Result<Self, ClientError> {
        let base_url = Url::parse(server_url)
            .map_err(|e| ClientError::Protocol(format!("invalid server URL '{server_url}': {e}")))?;
        let ca_certs = ca_file.map(load_ca_certificates).transpose()?;

        let mut http = reqwest::Client::builder();
        for cert in ca_certs.iter().flatten() {
            http = http.add_root_certificate(reqwest::Certificate::from_der(cert.as_ref())?);
        }
        let ws_tls = match base_url.scheme() {
            "https" => Some(client_config(ca_certs.as_deref())?),
            _ => None,
        };

        Ok(Self {
            http: http.build()?,
            base_url,
            ws_tls,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Protocol(format!("invalid endpoint '{path}': {e}")))
    }

    /// `GetRooms`: call `on_room` for every room as its line arrives
    pub async fn stream_rooms(
        &self,
        substring: &str,
        mut on_room: impl FnMut(RoomDto),
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/rooms/search")?)
            .json(&RoomSearch {
                substring: substring.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;

        let mut body = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        while let Some(chunk) = body.next().await {
            buffer.extend_from_slice(&chunk?);
            while let Some(newline) = buffer.iter().position(|byte| *byte == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                on_room(parse_room(&line[..newline])?);
            }
        }
        if !buffer.iter().all(u8::is_ascii_whitespace) {
            on_room(parse_room(&buffer)?);
        }

        Ok(())
    }

    /// `GetRooms`, collected
    pub async fn get_rooms(&self, substring: &str) -> Result<Vec<RoomDto>, ClientError> {
        let mut rooms = Vec::new();
        self.stream_rooms(substring, |room| rooms.push(room)).await?;
        Ok(rooms)
    }

    /// `Login`. Rejections come back as an `AuthResponse`, not as an error.
    pub async fn login(&self, room: &str, user_name: &str) -> Result<AuthResponse, ClientError> {
        self.auth_request("/api/login", room, user_name).await
    }

    pub async fn logout(&self, room: &str, user_name: &str) -> Result<AuthResponse, ClientError> {
        self.auth_request("/api/logout", room, user_name).await
    }

    async fn auth_request(
        &self,
        path: &str,
        room: &str,
        user_name: &str,
    ) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint(path)?)
            .json(&RoomRequest {
                name: room.to_string(),
                user_name: user_name.to_string(),
            })
            .send()
            .await?;
        Ok(response.json::<AuthResponse>().await?)
    }

    /// Open the bidirectional `Chat` stream
    pub async fn connect_chat(&self) -> Result<(ChatSender, ChatReceiver), ClientError> {
        let url = chat_url(&self.base_url)?;
        let (ws_stream, _response) = match &self.ws_tls {
            Some(config) => {
                let connector = Connector::Rustls(config.clone());
                connect_async_tls_with_config(url.as_str(), None, false, Some(connector)).await?
            }
            None => connect_async(url.as_str()).await?,
        };
        tracing::info!("Connected to chat stream at {}", url);

        let (sink, stream) = ws_stream.split();
        Ok((ChatSender { sink }, ChatReceiver { stream }))
    }
}

fn parse_room(line: &[u8]) -> Result<RoomDto, ClientError> {
    serde_json::from_slice(line).map_err(|e| ClientError::Protocol(format!("bad room line: {e}")))
}

/// WebSocket URL of the chat stream for an HTTP base URL
pub fn chat_url(base_url: &Url) -> Result<Url, ClientError> {
    let mut url = base_url
        .join("/ws/chat")
        .map_err(|e| ClientError::Protocol(e.to_string()))?;
    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => {
            return Err(ClientError::Protocol(format!(
                "unsupported URL scheme '{other}'"
            )));
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| ClientError::Protocol(format!("cannot use scheme '{scheme}'")))?;
    Ok(url)
}

/// Outbound half of the chat stream
pub struct ChatSender {
    sink: SplitSink<WsStream, Message>,
}

impl ChatSender {
    pub async fn send(&mut self, message: &MessageDto) -> Result<(), ClientError> {
        let json = serde_json::to_string(message)
            .map_err(|e| ClientError::Protocol(format!("failed to encode message: {e}")))?;
        self.sink.send(Message::Text(json.into())).await?;
        Ok(())
    }

    /// Send a close frame
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.sink.close().await?;
        Ok(())
    }
}

/// Inbound half of the chat stream
pub struct ChatReceiver {
    stream: SplitStream<WsStream>,
}

impl ChatReceiver {
    /// Next relayed message, or `None` once the stream has ended
    pub async fn next_message(&mut self) -> Option<Result<MessageDto, ClientError>> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    return Some(serde_json::from_str(text.as_str()).map_err(|e| {
                        ClientError::Protocol(format!("bad chat frame: {e}"))
                    }));
                }
                Ok(Message::Close(_)) => return None,
                Ok(_) => continue,
                Err(e) => return Some(Err(ClientError::WebSocket(e))),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_from_http() {
        let base = Url::parse("http://127.0.0.1:10000").unwrap();
        assert_eq!(
            chat_url(&base).unwrap().as_str(),
            "ws://127.0.0.1:10000/ws/chat"
        );
    }

    #[test]
    fn test_chat_url_from_https() {
        let base = Url::parse("https://chat.example.com/").unwrap();
        assert_eq!(
            chat_url(&base).unwrap().as_str(),
            "wss://chat.example.com/ws/chat"
        );
    }

    #[test]
    fn test_chat_url_rejects_other_scheme() {
        let base = Url::parse("ftp://127.0.0.1").unwrap();
        assert!(matches!(chat_url(&base), Err(ClientError::Protocol(_))));
    }

    #[test]
    fn test_invalid_server_url() {
        assert!(RoomcastClient::new("not a url").is_err());
    }

    #[test]
    fn test_https_url_enables_stream_tls() {
        assert!(RoomcastClient::new("https://127.0.0.1:10000").unwrap().ws_tls.is_some());
        assert!(RoomcastClient::new("http://127.0.0.1:10000").unwrap().ws_tls.is_none());
    }

    #[test]
    fn test_missing_ca_file_is_rejected() {
        let result = RoomcastClient::with_ca_file(
            "https://127.0.0.1:10000",
            Some(Path::new("/nonexistent/ca.pem")),
        );
        assert!(matches!(result, Err(ClientError::Tls(_))));
    }

    #[test]
    fn test_parse_room_line() {
        let room = parse_room(br#"{"name":"Room 3","user_count":0}"#).unwrap();
        assert_eq!(room.name, "Room 3");
        assert!(parse_room(b"{").is_err());
    }
}
