//! Server configuration.
//!
//! Values come from an optional JSON file and are then overridden by
//! command-line flags in the server binary.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{domain::EchoPolicy, infrastructure::registry::DEFAULT_MAILBOX_CAPACITY};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_ROOM_COUNT: usize = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Rooms are named `Room 0` .. `Room {room_count - 1}`
    pub room_count: usize,
    pub echo_policy: EchoPolicy,
    /// Bound of each room actor's request queue
    pub room_mailbox_capacity: usize,
    /// Serve over TLS when present
    pub tls: Option<TlsConfig>,
}

/// PEM files of the server certificate chain and its private key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            room_count: DEFAULT_ROOM_COUNT,
            echo_policy: EchoPolicy::default(),
            room_mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            tls: None,
        }
    }
}

impl ServerConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_count == 0 {
            return Err(ConfigError::Invalid(
                "room_count must be at least 1".to_string(),
            ));
        }
        if self.room_mailbox_capacity == 0 {
            return Err(ConfigError::Invalid(
                "room_mailbox_capacity must be at least 1".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if let Some(tls) = &self.tls {
            if tls.cert_file.as_os_str().is_empty() || tls.key_file.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "tls needs both cert_file and key_file".to_string(),
                ));
            }
        }
        Ok(())
    }
}
