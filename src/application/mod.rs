// Application layer: validation, orchestration and the service decorators.

pub mod error;
pub mod middleware;
pub mod service;

pub use error::*;
pub use middleware::*;
pub use service::*;
