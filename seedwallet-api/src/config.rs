//! Server configuration loaded from the environment

use std::fmt;
use std::net::SocketAddr;

use base64::{engine::general_purpose, Engine as _};
use rand::{rngs::OsRng, RngCore};

/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Default bcrypt cost for login passwords
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Work factors bcrypt accepts
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// API server configuration
#[derive(Clone)]
pub struct ApiConfig {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// AES-256 key for secrets at rest
    pub vault_key: [u8; 32],
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl ApiConfig {
    /// Load configuration from `SEEDWALLET_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr_str = std::env::var("SEEDWALLET_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr_str.parse().map_err(|_| ConfigError::InvalidValue {
            name: "SEEDWALLET_LISTEN_ADDR",
            value: listen_addr_str.clone(),
        })?;

        let bcrypt_cost = match std::env::var("SEEDWALLET_BCRYPT_COST") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid SEEDWALLET_BCRYPT_COST {:?}", value);
                DEFAULT_BCRYPT_COST
            }),
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        Ok(Self {
            listen_addr,
            vault_key: load_vault_key(std::env::var("SEEDWALLET_VAULT_KEY").ok())?,
            bcrypt_cost: clamp_bcrypt_cost(bcrypt_cost),
        })
    }
}

/// Resolve the vault key from the raw `SEEDWALLET_VAULT_KEY` value
///
/// A missing key falls back to a random one; a malformed key is an error.
pub fn load_vault_key(value: Option<String>) -> Result<[u8; 32], ConfigError> {
    if let Some(encoded) = value {
        // The rejected value is a secret and stays out of the error
        return decode_vault_key(&encoded).ok_or(ConfigError::InvalidValue {
            name: "SEEDWALLET_VAULT_KEY",
            value: "expected base64 of exactly 32 bytes".to_string(),
        });
    }

    // Secrets encrypted with an ephemeral key cannot be read after a restart
    tracing::warn!("SEEDWALLET_VAULT_KEY not set, using a random per-process vault key - stored secrets will not survive a restart");
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    Ok(key)
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("listen_addr", &self.listen_addr)
            .field("vault_key", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Decode a base64 vault key, requiring exactly 32 bytes
pub fn decode_vault_key(encoded: &str) -> Option<[u8; 32]> {
    general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
}

/// Keep the cost inside the range bcrypt accepts
pub fn clamp_bcrypt_cost(cost: u32) -> u32 {
    cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST)
}
