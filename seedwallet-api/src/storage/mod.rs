//! Storage of secrets for the SeedWallet API

pub mod vault;

pub use vault::{SecretVault, VaultError};
