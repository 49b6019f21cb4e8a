//! Application state management

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::database::{InMemoryWalletRepository, WalletRepository};
use crate::error::ServiceError;
use crate::storage::{SecretVault, VaultError};

/// Application state shared across HTTP handlers
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Users, wallets and accounts
    pub repository: Arc<dyn WalletRepository<Error = ServiceError>>,
    /// Encryption of seed phrases and private keys at rest
    pub vault: SecretVault,
}

impl AppState {
    /// State backed by the in-memory repository
    pub fn new(config: ApiConfig) -> Result<Self, VaultError> {
        Self::with_repository(config, Arc::new(InMemoryWalletRepository::new()))
    }

    pub fn with_repository(
        config: ApiConfig,
        repository: Arc<dyn WalletRepository<Error = ServiceError>>,
    ) -> Result<Self, VaultError> {
        let vault = SecretVault::new(&config.vault_key)?;
        Ok(Self { config, repository, vault })
    }
}
