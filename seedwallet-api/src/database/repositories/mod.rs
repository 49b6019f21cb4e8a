//! Repository implementations

pub mod wallet_repository;

pub use wallet_repository::{InMemoryWalletRepository, WalletRepository};
