//! Persistence for users, wallets and accounts

pub mod repositories;

pub use repositories::{InMemoryWalletRepository, WalletRepository};
