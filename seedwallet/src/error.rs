//! Error types for the seedwallet library

use thiserror::Error;

/// Custom error type for seedwallet operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The phrase does not have exactly twelve words
    #[error("Seed phrase must be exactly 12 words, got {0}")]
    InvalidWordCount(usize),

    /// The phrase has twelve words but is not a valid BIP39 mnemonic
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// The underlying mnemonic library failed
    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether the error was caused by caller input rather than a library failure
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidWordCount(_)
                | Error::InvalidMnemonic(_)
                | Error::UnsupportedChain(_)
                | Error::InvalidDerivationPath(_)
                | Error::InvalidInput(_)
        )
    }
}

/// Result type for seedwallet operations
pub type Result<T> = std::result::Result<T, Error>;
