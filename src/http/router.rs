use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::application::WalletService;

use super::handlers;

/// Shared handler state: the (decorated) wallet service.
#[derive(Clone)]
pub struct AppState {
    pub wallet: Arc<dyn WalletService>,
}

/// Build the axum router with all wallet endpoints.
pub fn build_router(wallet: Arc<dyn WalletService>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/accounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route("/accounts/:id", get(handlers::get_account))
        .route(
            "/accounts/:id/payments",
            get(handlers::get_payments).post(handlers::make_payment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { wallet })
}
