//! SeedWallet Core - deterministic HD key derivation
//!
//! This library turns 12-word BIP39 seed phrases into Solana and Ethereum
//! accounts using the standard derivation paths, and allocates account indices
//! for wallets. It performs no I/O: callers persist whatever it produces.

pub mod error;
pub mod crypto;
pub mod account;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use crypto::keys::{Chain, DerivedAccount};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
