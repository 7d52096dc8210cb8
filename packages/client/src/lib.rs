//! Command-line client for the multi-room chat relay.

pub mod command;
pub mod error;
pub mod formatter;
pub mod rpc;
pub mod runner;
pub mod session;
pub mod tls;
pub mod ui;
