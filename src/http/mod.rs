//! HTTP transport: routes, handlers and the error-to-status mapping.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{AppState, build_router};
pub use server::serve;
