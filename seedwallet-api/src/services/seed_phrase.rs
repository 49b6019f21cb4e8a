//! Seed phrase generation and validation endpoints

use axum::Json;
use zeroize::Zeroizing;

use seedwallet::crypto::mnemonic::{check_mnemonic, generate_mnemonic};
use seedwallet::Error as WalletError;

use crate::error::{bad_request, ServiceError};
use crate::models::{MessageResponse, SeedPhraseRequest, SeedPhraseResponse};

use super::non_empty;

/// `GET /api/seed-phrase`
pub async fn generate() -> Result<Json<SeedPhraseResponse>, ServiceError> {
    let seed_phrase = generate_mnemonic()?;
    Ok(Json(SeedPhraseResponse { success: true, seed_phrase }))
}

/// `POST /api/seed-phrase` and `POST /api/auth/import`
pub async fn validate(Json(request): Json<SeedPhraseRequest>) -> Result<Json<MessageResponse>, ServiceError> {
    let phrase = required_seed_phrase(request.seed_phrase)?;
    check_seed_phrase(&phrase)?;
    Ok(Json(MessageResponse::ok("Seed phrase validated successfully")))
}

/// Extract a seed phrase field, rejecting a missing or blank value
pub(crate) fn required_seed_phrase(value: Option<String>) -> Result<Zeroizing<String>, ServiceError> {
    non_empty(value)
        .map(Zeroizing::new)
        .ok_or_else(|| bad_request("Seed phrase is required"))
}

/// Validate a phrase and return its normalized form
pub(crate) fn check_seed_phrase(phrase: &str) -> Result<Zeroizing<String>, ServiceError> {
    check_mnemonic(phrase).map(Zeroizing::new).map_err(|e| match e {
        WalletError::InvalidWordCount(_) => bad_request("Seed phrase must be exactly 12 words"),
        WalletError::InvalidMnemonic(_) => {
            bad_request("Invalid seed phrase. Please check your words and try again.")
        }
        other => ServiceError::from(other),
    })
}
