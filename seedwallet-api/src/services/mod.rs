//! HTTP service implementations

pub mod account;
pub mod auth;
pub mod health;
pub mod seed_phrase;
pub mod wallet;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::state::AppState;

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/seed-phrase", get(seed_phrase::generate).post(seed_phrase::validate))
        .route("/api/auth/import", post(seed_phrase::validate))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/wallet/create", post(wallet::create_from_seed_phrase))
        .route("/api/wallet/import", post(wallet::import))
        .route("/api/wallet", post(wallet::create_wallet).get(wallet::list_wallets))
        .route("/api/account", post(account::create_account).delete(account::delete_account))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Trimmed value of a required field, or `None` if it is missing or blank
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an identifier; malformed ids cannot match any record
pub(crate) fn parse_id(value: &str, not_found: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(value).map_err(|_| ServiceError::NotFound(not_found.to_string()))
}
