//! Wallet endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use seedwallet::Chain;

use crate::error::{bad_request, not_found, ServiceError};
use crate::models::{
    CreateWalletRequest, ImportWalletsResponse, ListWalletsQuery, SeedPhraseRequest, UserEntity,
    UserResponse, WalletEntity, WalletResponse, WalletWithAccounts, WalletsResponse,
};
use crate::state::AppState;

use super::seed_phrase::{check_seed_phrase, required_seed_phrase};
use super::{non_empty, parse_id};

/// `POST /api/wallet/create`
///
/// Registers a user that owns the given seed phrase, without a password.
pub async fn create_from_seed_phrase(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeedPhraseRequest>,
) -> Result<Json<UserResponse>, ServiceError> {
    let phrase = check_seed_phrase(&required_seed_phrase(request.seed_phrase)?)?;
    let fingerprint = state.vault.fingerprint(&phrase);

    if state.repository.find_user_by_fingerprint(&fingerprint).await?.is_some() {
        return Err(ServiceError::Conflict("Wallet with this seed phrase already exists".to_string()));
    }

    let user = state
        .repository
        .create_user(UserEntity {
            id: Uuid::new_v4(),
            password_hash: None,
            encrypted_seed_phrase: state.vault.encrypt(&phrase)?,
            seed_fingerprint: fingerprint,
            created_at: Utc::now(),
        })
        .await?;

    Ok(Json(UserResponse {
        success: true,
        user_id: user.id,
        message: Some("Wallet created successfully".to_string()),
    }))
}

/// `POST /api/wallet/import`
///
/// Looks up the wallets of whoever owns the seed phrase. An unknown phrase is
/// not an error.
pub async fn import(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeedPhraseRequest>,
) -> Result<Json<ImportWalletsResponse>, ServiceError> {
    let phrase = check_seed_phrase(&required_seed_phrase(request.seed_phrase)?)?;
    let fingerprint = state.vault.fingerprint(&phrase);

    let Some(user) = state.repository.find_user_by_fingerprint(&fingerprint).await? else {
        return Ok(Json(ImportWalletsResponse {
            success: true,
            wallets: Vec::new(),
            user_id: None,
            message: "No existing wallets found for this seed phrase".to_string(),
        }));
    };

    let wallets = load_wallets(&state, user.id).await?;
    let message = import_summary(&wallets);
    info!("Imported user {}: {}", user.id, message);

    Ok(Json(ImportWalletsResponse {
        success: true,
        wallets,
        user_id: Some(user.id),
        message,
    }))
}

/// `POST /api/wallet`
pub async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateWalletRequest>,
) -> Result<Json<WalletResponse>, ServiceError> {
    let (user_id, name, blockchain) = match (
        non_empty(request.user_id),
        non_empty(request.name),
        request.blockchain.filter(|b| !b.is_empty()),
    ) {
        (Some(user_id), Some(name), Some(blockchain)) => (user_id, name, blockchain),
        _ => return Err(bad_request("User ID, name, and blockchain are required")),
    };

    let blockchain: Chain = blockchain
        .parse()
        .map_err(|_| bad_request("Blockchain must be either solana or ethereum"))?;

    let user_id = parse_id(&user_id, "User not found")?;
    if state.repository.get_user(user_id).await?.is_none() {
        return Err(not_found("User not found"));
    }

    let wallet = state
        .repository
        .create_wallet(WalletEntity::new(user_id, name, blockchain))
        .await?;

    Ok(Json(WalletResponse {
        success: true,
        wallet: WalletWithAccounts { wallet, accounts: Vec::new() },
    }))
}

/// `GET /api/wallet?userId=`
pub async fn list_wallets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListWalletsQuery>,
) -> Result<Json<WalletsResponse>, ServiceError> {
    let user_id = non_empty(query.user_id).ok_or_else(|| bad_request("User ID is required"))?;

    // An id that is not a UUID cannot own any wallets
    let wallets = match Uuid::parse_str(&user_id) {
        Ok(user_id) => load_wallets(&state, user_id).await?,
        Err(_) => Vec::new(),
    };

    Ok(Json(WalletsResponse { success: true, wallets }))
}

async fn load_wallets(state: &AppState, user_id: Uuid) -> Result<Vec<WalletWithAccounts>, ServiceError> {
    let mut result = Vec::new();
    for wallet in state.repository.list_wallets_by_user(user_id).await? {
        let accounts = state.repository.list_accounts(wallet.id).await?;
        result.push(WalletWithAccounts { wallet, accounts });
    }
    Ok(result)
}

/// "Found N wallet(s) with M accounts"
fn import_summary(wallets: &[WalletWithAccounts]) -> String {
    let account_count: usize = wallets.iter().map(|w| w.accounts.len()).sum();
    let plural = if wallets.len() == 1 { "" } else { "s" };
    format!("Found {} wallet{} with {} accounts", wallets.len(), plural, account_count)
}
