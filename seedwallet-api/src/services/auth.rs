//! Registration and login

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use seedwallet::crypto::mnemonic::generate_mnemonic;

use crate::error::{bad_request, ServiceError};
use crate::middleware::PasswordUtils;
use crate::models::{LoginRequest, RegisterRequest, RegisterResponse, UserEntity, UserResponse};
use crate::state::AppState;

use super::non_empty;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// `POST /api/auth/register`
///
/// Creates a user with a fresh seed phrase. The phrase is returned once and
/// only stored encrypted.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ServiceError> {
    let password = request.password.filter(|p| !p.is_empty()).map(Zeroizing::new);
    let confirm = request.confirm_password.filter(|p| !p.is_empty()).map(Zeroizing::new);

    let (password, confirm) = match (password, confirm) {
        (Some(password), Some(confirm)) => (password, confirm),
        _ => return Err(bad_request("Password and confirm password are required")),
    };
    PasswordUtils::validate_new_password(&password, &confirm)?;

    let seed_phrase = Zeroizing::new(generate_mnemonic()?);
    let password_hash = PasswordUtils::hash_password(&password, state.config.bcrypt_cost).await?;

    let user = state
        .repository
        .create_user(UserEntity {
            id: Uuid::new_v4(),
            password_hash: Some(password_hash),
            encrypted_seed_phrase: state.vault.encrypt(&seed_phrase)?,
            seed_fingerprint: state.vault.fingerprint(&seed_phrase),
            created_at: Utc::now(),
        })
        .await?;

    info!("Registered user {}", user.id);

    Ok(Json(RegisterResponse {
        success: true,
        user_id: user.id,
        seed_phrase: seed_phrase.to_string(),
    }))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ServiceError> {
    let user_id = non_empty(request.user_id);
    let password = request.password.filter(|p| !p.is_empty()).map(Zeroizing::new);

    let (user_id, password) = match (user_id, password) {
        (Some(user_id), Some(password)) => (user_id, password),
        _ => return Err(bad_request("User ID and password are required")),
    };

    let unauthorized = || ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string());

    let user_id = Uuid::parse_str(&user_id).map_err(|_| unauthorized())?;
    let user = state.repository.get_user(user_id).await?.ok_or_else(unauthorized)?;

    // Users created from a bare seed phrase have no password to log in with
    let password_hash = user.password_hash.as_deref().ok_or_else(unauthorized)?;

    if !PasswordUtils::verify_password(&password, password_hash).await? {
        warn!("Failed login for user {}", user.id);
        return Err(unauthorized());
    }

    info!("User {} logged in", user.id);

    Ok(Json(UserResponse {
        success: true,
        user_id: user.id,
        message: None,
    }))
}
