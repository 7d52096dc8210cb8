//! Server execution logic.

use std::{future::Future, io, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use axum_server::tls_rustls::{RustlsConfig, from_tcp_rustls};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::{RoomDirectory, ValueObjectError},
    infrastructure::registry::ActorRoomRegistry,
    usecase::{
        GetRoomStateUseCase, GetRoomsUseCase, LoginUseCase, LogoutUseCase, RelayMessageUseCase,
        ReleaseConnectionUseCase,
    },
};

use super::{
    handler::{chat_handler, debug_rooms, get_rooms, health_check, login, logout},
    signal::shutdown_signal,
    state::AppState,
};

/// How long open connections may drain after shutdown is requested on a TLS listener
const TLS_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Multi-room chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::from_config(&ServerConfig::default())?;
/// server.run("127.0.0.1", 10000, None).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server from already wired usecases
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Wire every layer from a configuration.
    ///
    /// Spawns one actor per room, so it must be called inside a tokio runtime.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ValueObjectError> {
        // Initialize dependencies in order:
        // 1. Room Directory
        // 2. Room Registry (one actor per room)
        // 3. UseCases
        // 4. AppState

        // 1. Create the fixed set of rooms
        let directory = Arc::new(RoomDirectory::with_room_count(config.room_count)?);
        tracing::info!("{} rooms created", directory.len());

        // 2. Spawn the room actors
        let registry = Arc::new(ActorRoomRegistry::spawn(
            &directory,
            config.echo_policy,
            config.room_mailbox_capacity,
        ));

        // 3. Create UseCases
        let state = AppState {
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(directory)),
            login_usecase: Arc::new(LoginUseCase::new(registry.clone())),
            logout_usecase: Arc::new(LogoutUseCase::new()),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(registry.clone())),
            release_connection_usecase: Arc::new(ReleaseConnectionUseCase::new(registry.clone())),
            get_room_state_usecase: Arc::new(GetRoomStateUseCase::new(registry)),
        };

        // 4. Create the server
        Ok(Self::new(state))
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // Chat stream (WebSocket)
            .route("/ws/chat", get(chat_handler))
            // RPC endpoints
            .route("/api/rooms/search", post(get_rooms))
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/debug/rooms", get(debug_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C, over TLS when `tls` is given
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: &str,
        port: u16,
        tls: Option<Arc<rustls::ServerConfig>>,
    ) -> io::Result<()> {
        let listener = TcpListener::bind((host, port)).await?;
        tracing::info!("Press Ctrl+C to shutdown gracefully");
        match tls {
            Some(tls) => self.serve_tls(listener, tls, shutdown_signal()).await,
            None => self.serve(listener, shutdown_signal()).await,
        }
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!("Chat relay server listening on {}", addr);
        tracing::info!("Connect to: ws://{}/ws/chat", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve HTTPS and `wss` on an already bound listener until `shutdown` resolves
    pub async fn serve_tls<F>(
        self,
        listener: TcpListener,
        tls: Arc<rustls::ServerConfig>,
        shutdown: F,
    ) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!("Chat relay server listening on {} (TLS)", addr);
        tracing::info!("Connect to: wss://{}/ws/chat", addr);

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown.await;
            shutdown_handle.graceful_shutdown(Some(TLS_SHUTDOWN_GRACE));
        });

        from_tcp_rustls(listener.into_std()?, RustlsConfig::from_config(tls))
            .handle(handle)
            .serve(self.router().into_make_service())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
