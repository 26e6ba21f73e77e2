use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::domain::{Account, AccountId, Payment};

use super::error::ApiError;
use super::router::AppState;

const BAD_REQUEST: &str = "Bad request";

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /accounts
pub async fn create_account(
    State(state): State<AppState>,
    body: Result<Json<Account>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let Json(account) = body.map_err(|_| ApiError::BadRequest(BAD_REQUEST))?;
    let account = state.wallet.create_account(account).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /accounts
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountId>>, ApiError> {
    Ok(Json(state.wallet.list_accounts().await?))
}

/// GET /accounts/:id
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let account = state.wallet.get_account(&AccountId::new(id)).await?;
    Ok(Json(account))
}

/// GET /accounts/:id/payments
pub async fn get_payments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = state.wallet.get_payments(&AccountId::new(id)).await?;
    Ok(Json(payments))
}

/// POST /accounts/:id/payments
///
/// The payer is the account in the path. A body may repeat it in `account`
/// but cannot name a different one.
pub async fn make_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Payment>, JsonRejection>,
) -> Result<Json<Payment>, ApiError> {
    let Json(mut payment) = body.map_err(|_| ApiError::BadRequest(BAD_REQUEST))?;

    let payer = AccountId::new(id);
    if payment.account.is_empty() {
        payment.account = payer.clone();
    }
    if payment.account != payer {
        return Err(ApiError::BadRequest("Payment source account mismatch"));
    }

    Ok(Json(state.wallet.make_payment(payment).await?))
}
