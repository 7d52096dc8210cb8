//! Multi-room chat relay server.
//!
//! Serves room discovery, login / logout and the bidirectional chat stream.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 0.0.0.0 --port 3000 --rooms 3
//! cargo run --bin roomcast-server -- --config server.json --exclude-sender-echo
//! cargo run --bin roomcast-server -- --tls --cert-file server.pem --key-file server.key
//! ```

use std::path::PathBuf;

use clap::Parser;

use roomcast_server::{
    config::{ConfigError, ServerConfig, TlsConfig},
    domain::EchoPolicy,
    ui::{Server, tls::load_server_config},
};
use roomcast_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomcast-server")]
#[command(about = "Multi-room chat relay server", long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Host address to bind the server to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port number to bind the server to
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Number of rooms to create
    #[arg(long)]
    rooms: Option<usize>,

    /// Do not echo a message back to its sender
    #[arg(long)]
    exclude_sender_echo: bool,

    /// Serve over TLS
    #[arg(long)]
    tls: bool,

    /// PEM certificate chain used with --tls
    #[arg(long, requires = "tls")]
    cert_file: Option<PathBuf>,

    /// PEM private key used with --tls
    #[arg(long, requires = "tls")]
    key_file: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(rooms) = self.rooms {
            config.room_count = rooms;
        }
        if self.exclude_sender_echo {
            config.echo_policy = EchoPolicy::ExcludeSender;
        }
        if self.tls {
            let from_file = config.tls.take();
            let cert_file = self
                .cert_file
                .or_else(|| from_file.as_ref().map(|tls| tls.cert_file.clone()));
            let key_file = self
                .key_file
                .or_else(|| from_file.map(|tls| tls.key_file));
            let (Some(cert_file), Some(key_file)) = (cert_file, key_file) else {
                return Err(ConfigError::Invalid(
                    "--tls needs --cert-file and --key-file".to_string(),
                ));
            };
            config.tls = Some(TlsConfig {
                cert_file,
                key_file,
            });
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::from_config(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    let tls = match &config.tls {
        Some(tls) => match load_server_config(&tls.cert_file, &tls.key_file) {
            Ok(tls) => Some(tls),
            Err(e) => {
                tracing::error!("TLS error: {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    if let Err(e) = server.run(&config.host, config.port, tls).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
