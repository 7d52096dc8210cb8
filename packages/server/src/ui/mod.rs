//! HTTP + WebSocket front end of the chat relay.

mod handler;
mod server;
mod signal;
pub mod state;
pub mod tls;

pub use server::Server;
pub use signal::shutdown_signal;
