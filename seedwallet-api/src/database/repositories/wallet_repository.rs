//! Wallet repository
//!
//! The repository owns the account index invariants: an index is unique
//! within a wallet and, once handed out, is never handed out again. Each
//! wallet tracks the high-water mark in `next_account_index`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::{AccountEntity, UserEntity, WalletEntity};

/// Storage for users, wallets and accounts
#[async_trait]
pub trait WalletRepository: Send + Sync {
    type Error;

    /// Insert a user; fails with a conflict if the seed fingerprint is taken
    async fn create_user(&self, user: UserEntity) -> Result<UserEntity, Self::Error>;
    async fn get_user(&self, id: Uuid) -> Result<Option<UserEntity>, Self::Error>;
    async fn find_user_by_fingerprint(&self, fingerprint: &str) -> Result<Option<UserEntity>, Self::Error>;

    /// Insert a wallet for an existing user
    async fn create_wallet(&self, wallet: WalletEntity) -> Result<WalletEntity, Self::Error>;
    async fn get_wallet(&self, id: Uuid) -> Result<Option<WalletEntity>, Self::Error>;
    async fn list_wallets_by_user(&self, user_id: Uuid) -> Result<Vec<WalletEntity>, Self::Error>;

    /// Accounts of a wallet ordered by account index
    async fn list_accounts(&self, wallet_id: Uuid) -> Result<Vec<AccountEntity>, Self::Error>;

    /// Insert an account and advance the wallet's high-water mark.
    ///
    /// Fails with a conflict if the index is already taken or lies below the
    /// high-water mark, so that callers racing on the same wallet can retry.
    async fn create_account(&self, account: AccountEntity) -> Result<AccountEntity, Self::Error>;

    /// Remove an account, returning it if it existed
    async fn delete_account(&self, id: Uuid) -> Result<Option<AccountEntity>, Self::Error>;
}

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserEntity>,
    users_by_fingerprint: HashMap<String, Uuid>,
    wallets: HashMap<Uuid, WalletEntity>,
    accounts: HashMap<Uuid, AccountEntity>,
}

/// In-memory repository; all tables sit behind one lock so compound
/// updates are atomic
#[derive(Default)]
pub struct InMemoryWalletRepository {
    tables: RwLock<Tables>,
}

impl InMemoryWalletRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletRepository for InMemoryWalletRepository {
    type Error = ServiceError;

    async fn create_user(&self, user: UserEntity) -> Result<UserEntity, Self::Error> {
        let mut tables = self.tables.write().await;

        if tables.users_by_fingerprint.contains_key(&user.seed_fingerprint) {
            return Err(ServiceError::Conflict("Seed phrase already registered".to_string()));
        }

        tables.users_by_fingerprint.insert(user.seed_fingerprint.clone(), user.id);
        tables.users.insert(user.id, user.clone());

        info!("Created user {}", user.id);
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<UserEntity>, Self::Error> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_user_by_fingerprint(&self, fingerprint: &str) -> Result<Option<UserEntity>, Self::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .users_by_fingerprint
            .get(fingerprint)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create_wallet(&self, wallet: WalletEntity) -> Result<WalletEntity, Self::Error> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&wallet.user_id) {
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        tables.wallets.insert(wallet.id, wallet.clone());

        info!("Created {} wallet {} for user {}", wallet.blockchain, wallet.id, wallet.user_id);
        Ok(wallet)
    }

    async fn get_wallet(&self, id: Uuid) -> Result<Option<WalletEntity>, Self::Error> {
        let tables = self.tables.read().await;
        Ok(tables.wallets.get(&id).cloned())
    }

    async fn list_wallets_by_user(&self, user_id: Uuid) -> Result<Vec<WalletEntity>, Self::Error> {
        let tables = self.tables.read().await;

        let mut wallets: Vec<WalletEntity> = tables
            .wallets
            .values()
            .filter(|wallet| wallet.user_id == user_id)
            .cloned()
            .collect();
        wallets.sort_by_key(|wallet| wallet.created_at);

        Ok(wallets)
    }

    async fn list_accounts(&self, wallet_id: Uuid) -> Result<Vec<AccountEntity>, Self::Error> {
        let tables = self.tables.read().await;

        let mut accounts: Vec<AccountEntity> = tables
            .accounts
            .values()
            .filter(|account| account.wallet_id == wallet_id)
            .cloned()
            .collect();
        accounts.sort_by_key(|account| account.account_index);

        Ok(accounts)
    }

    async fn create_account(&self, account: AccountEntity) -> Result<AccountEntity, Self::Error> {
        let mut tables = self.tables.write().await;

        let high_water = tables
            .wallets
            .get(&account.wallet_id)
            .map(|wallet| wallet.next_account_index)
            .ok_or_else(|| ServiceError::NotFound("Wallet not found".to_string()))?;

        let taken = tables
            .accounts
            .values()
            .any(|a| a.wallet_id == account.wallet_id && a.account_index == account.account_index);

        if taken || account.account_index < high_water {
            debug!(
                "Account index {} unavailable in wallet {} (high water {})",
                account.account_index, account.wallet_id, high_water
            );
            return Err(ServiceError::Conflict("Account index already allocated".to_string()));
        }

        if let Some(wallet) = tables.wallets.get_mut(&account.wallet_id) {
            wallet.next_account_index = account.account_index.saturating_add(1);
        }
        tables.accounts.insert(account.id, account.clone());

        info!(
            "Created account {} at index {} in wallet {}",
            account.id, account.account_index, account.wallet_id
        );
        Ok(account)
    }

    async fn delete_account(&self, id: Uuid) -> Result<Option<AccountEntity>, Self::Error> {
        let mut tables = self.tables.write().await;

        let removed = tables.accounts.remove(&id);
        if let Some(account) = &removed {
            info!("Deleted account {} from wallet {}", account.id, account.wallet_id);
        }

        Ok(removed)
    }
}
