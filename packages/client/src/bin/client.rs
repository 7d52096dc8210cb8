//! Interactive chat client for the multi-room relay.
//!
//! Commands: `get_rooms [substring]`, `login <room>`, `username <name>`,
//! `logout`, `quit`; any other line is sent to the joined room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-client -- --user-name alice
//! cargo run --bin roomcast-client -- -s http://127.0.0.1:10000 -u bob
//! cargo run --bin roomcast-client -- -s https://localhost:10000 --ca-file ca.pem
//! ```

use std::path::PathBuf;

use clap::Parser;

use roomcast_client::{rpc::RoomcastClient, runner::run_client};
use roomcast_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomcast-client")]
#[command(about = "Interactive client for the multi-room chat relay", long_about = None)]
struct Args {
    /// Server base URL; `https://` connects over TLS
    #[arg(short = 's', long, default_value = "http://127.0.0.1:10000")]
    server_url: String,

    /// PEM file of additional trusted CA certificates
    #[arg(long)]
    ca_file: Option<PathBuf>,

    /// User name used in every room
    #[arg(short = 'u', long, default_value = "guest")]
    user_name: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let client = match RoomcastClient::with_ca_file(&args.server_url, args.ca_file.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_client(client, args.user_name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
