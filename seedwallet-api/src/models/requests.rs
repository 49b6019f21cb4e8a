//! Request and response bodies
//!
//! Request fields are optional so that missing values are reported with a
//! specific message instead of a generic extractor rejection. Requests that
//! carry secrets do not implement `Debug`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wallet::{AccountEntity, WalletWithAccounts};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPhraseRequest {
    pub seed_phrase: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub blockchain: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWalletsQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub wallet_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountQuery {
    pub account_id: Option<String>,
}

/// `{ success, message }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPhraseResponse {
    pub success: bool,
    pub seed_phrase: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: Uuid,
    pub seed_phrase: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub success: bool,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWalletsResponse {
    pub success: bool,
    pub wallets: Vec<WalletWithAccounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub success: bool,
    pub wallet: WalletWithAccounts,
}

#[derive(Debug, Serialize)]
pub struct WalletsResponse {
    pub success: bool,
    pub wallets: Vec<WalletWithAccounts>,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub success: bool,
    pub account: AccountEntity,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
