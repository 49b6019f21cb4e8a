//! Account endpoints
//!
//! Accounts are derived from the owner's seed phrase at the next free index
//! of the wallet. The repository rejects an index that another request
//! claimed first, in which case allocation starts over.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use seedwallet::account::{next_index_with_high_water, validate_address};
use seedwallet::crypto::keys::derive_account;

use crate::error::{bad_request, not_found, ServiceError};
use crate::models::{
    AccountEntity, AccountResponse, CreateAccountRequest, DeleteAccountQuery, MessageResponse,
    WalletEntity,
};
use crate::state::AppState;

use super::{non_empty, parse_id};

/// Attempts at claiming an index before giving up
const MAX_ALLOCATION_ATTEMPTS: usize = 3;

/// `POST /api/account`
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, ServiceError> {
    let (wallet_id, name) = match (non_empty(request.wallet_id), non_empty(request.name)) {
        (Some(wallet_id), Some(name)) => (wallet_id, name),
        _ => return Err(bad_request("Wallet ID and name are required")),
    };

    let wallet_id = parse_id(&wallet_id, "Wallet not found")?;

    for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
        let wallet = state
            .repository
            .get_wallet(wallet_id)
            .await?
            .ok_or_else(|| not_found("Wallet not found"))?;

        match allocate_account(&state, &wallet, &name).await {
            Ok(account) => return Ok(Json(AccountResponse { success: true, account })),
            Err(ServiceError::Conflict(_)) => {
                debug!("Index race on wallet {} (attempt {})", wallet_id, attempt);
            }
            Err(e) => return Err(e),
        }
    }

    warn!("Gave up allocating an account index for wallet {}", wallet_id);
    Err(ServiceError::Conflict("Could not allocate an account index, please retry".to_string()))
}

async fn allocate_account(
    state: &AppState,
    wallet: &WalletEntity,
    name: &str,
) -> Result<AccountEntity, ServiceError> {
    let owner = state
        .repository
        .get_user(wallet.user_id)
        .await?
        .ok_or_else(|| ServiceError::Internal(format!("Wallet {} has no owner", wallet.id)))?;

    let existing = state.repository.list_accounts(wallet.id).await?;
    let index = next_index_with_high_water(&existing, wallet.next_account_index);

    let phrase = state.vault.decrypt(&owner.encrypted_seed_phrase)?;
    let derived = derive_account(&phrase, wallet.blockchain, index)?;

    // Never store an account whose address the chain would reject
    if !validate_address(derived.public_key(), wallet.blockchain) {
        return Err(ServiceError::Internal(format!(
            "Derived {} address at index {} failed validation",
            wallet.blockchain, index
        )));
    }

    let account = state
        .repository
        .create_account(AccountEntity {
            id: Uuid::new_v4(),
            wallet_id: wallet.id,
            name: name.to_string(),
            public_key: derived.public_key().to_string(),
            account_index: index,
            encrypted_private_key: state.vault.encrypt(derived.private_key())?,
            created_at: Utc::now(),
        })
        .await?;

    info!("Derived {} account {} at index {}", wallet.blockchain, account.id, index);
    Ok(account)
}

/// `DELETE /api/account?accountId=`
///
/// The freed index stays retired.
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteAccountQuery>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let account_id = non_empty(query.account_id).ok_or_else(|| bad_request("Account ID is required"))?;
    let account_id = parse_id(&account_id, "Account not found")?;

    state
        .repository
        .delete_account(account_id)
        .await?
        .ok_or_else(|| not_found("Account not found"))?;

    Ok(Json(MessageResponse::ok("Account deleted successfully")))
}
