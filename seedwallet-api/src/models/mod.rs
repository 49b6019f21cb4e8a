//! Data models for the SeedWallet API

pub mod wallet;
pub mod requests;

pub use wallet::{AccountEntity, UserEntity, WalletEntity, WalletWithAccounts};
pub use requests::*;
