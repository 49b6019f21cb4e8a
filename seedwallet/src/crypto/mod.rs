//! Cryptographic primitives and operations
//!
//! This module provides mnemonic generation and validation, seed stretching,
//! and per-chain key derivation.

pub mod mnemonic;
pub mod keys;

pub use mnemonic::*;
pub use keys::*;
