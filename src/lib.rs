pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod storage;
pub mod telemetry;

pub use application::{LedgerService, WalletError, WalletService};
pub use domain::*;
pub use storage::Repository;
