//! SeedWallet API
//!
//! REST server for the SeedWallet HD wallet manager. Users own one seed
//! phrase; wallets pin a chain; accounts are derived from the owner's phrase
//! at the next free index of their wallet.

pub mod config;
pub mod error;
pub mod state;
pub mod middleware;
pub mod models;
pub mod storage;
pub mod database;
pub mod services;
