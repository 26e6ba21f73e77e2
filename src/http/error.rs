use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::WalletError;

/// Anything a handler can fail with. Rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    Wallet(WalletError),
    /// The request could not be turned into a service call
    BadRequest(&'static str),
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        ApiError::Wallet(err)
    }
}

/// Translate a wallet error into its HTTP status.
pub fn status_for(err: &WalletError) -> StatusCode {
    match err {
        WalletError::EmptyAccountId
        | WalletError::EmptyCurrency
        | WalletError::NegativeBalance
        | WalletError::EmptyPaymentId
        | WalletError::EmptyPaymentSource
        | WalletError::EmptyPaymentDestination
        | WalletError::WrongPaymentAmount
        | WalletError::IncomingPaymentsNotAllowed
        | WalletError::SelfPayment => StatusCode::BAD_REQUEST,

        WalletError::AccountAlreadyExists | WalletError::PaymentAlreadyDone => {
            StatusCode::CONFLICT
        }

        WalletError::AccountNotFound
        | WalletError::PaymentSourceNotFound
        | WalletError::PaymentDestinationNotFound => StatusCode::NOT_FOUND,

        WalletError::DifferentCurrencies => StatusCode::FORBIDDEN,
        WalletError::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
        WalletError::PrecisionExceeded => StatusCode::UNPROCESSABLE_ENTITY,

        WalletError::DeadlineExceeded => StatusCode::SERVICE_UNAVAILABLE,
        WalletError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => json_error(StatusCode::BAD_REQUEST, message),
            ApiError::Wallet(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    tracing::error!("request failed: {err:?}");
                }
                json_error(status, err.to_string())
            }
        }
    }
}
