//! Key derivation and management
//!
//! This module maps a mnemonic, a chain and an account index to a
//! chain-native keypair.

pub mod ethereum;
pub mod solana;
mod derivation;

pub use derivation::*;
