use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage::StoreConfig;

/// Runtime configuration for the wallet server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub http_address: SocketAddr,
    pub database: PathBuf,
    pub max_connections: u32,
    /// Upper bound on a single service call
    pub request_timeout_ms: u64,
    /// Let payments drive a balance below zero instead of failing with
    /// insufficient funds
    pub allow_negative_balances: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database: PathBuf::from("wallet.db"),
            max_connections: 5,
            request_timeout_ms: 5_000,
            allow_negative_balances: false,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            database: self.database.clone(),
            max_connections: self.max_connections,
            allow_negative_balances: self.allow_negative_balances,
            ..StoreConfig::default()
        }
    }
}
