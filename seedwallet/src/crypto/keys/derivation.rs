//! Common key derivation functionality

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Offset added to a child index to mark it as hardened
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Largest account index that fits in a single BIP32 child slot
pub const MAX_ACCOUNT_INDEX: u32 = HARDENED_OFFSET - 1;

/// Supported blockchains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Solana (ed25519, SLIP-44 coin type 501)
    Solana,
    /// Ethereum (secp256k1, SLIP-44 coin type 60)
    Ethereum,
}

impl Chain {
    /// Every supported chain
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Ethereum];

    /// The chain identifier used by callers
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
        }
    }

    /// SLIP-44 coin type
    pub fn coin_type(&self) -> u32 {
        match self {
            Chain::Solana => 501,
            Chain::Ethereum => 60,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = Error;

    /// Identifiers must match exactly, as in the serde representation
    fn from_str(s: &str) -> Result<Self> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| Error::UnsupportedChain(s.to_string()))
    }
}

/// A BIP32 derivation path such as `m/44'/60'/0'/0/0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The standard path of account `index` on `chain`
    ///
    /// Solana uses `m/44'/501'/{index}'/0'`, Ethereum uses `m/44'/60'/0'/0/{index}`.
    pub fn for_account(chain: Chain, index: u32) -> Result<Self> {
        if index > MAX_ACCOUNT_INDEX {
            return Err(Error::InvalidInput(format!(
                "Account index {} exceeds maximum {}",
                index, MAX_ACCOUNT_INDEX
            )));
        }

        let purpose = 44 | HARDENED_OFFSET;
        let coin_type = chain.coin_type() | HARDENED_OFFSET;
        let components = match chain {
            Chain::Solana => vec![purpose, coin_type, index | HARDENED_OFFSET, HARDENED_OFFSET],
            Chain::Ethereum => vec![purpose, coin_type, HARDENED_OFFSET, 0, index],
        };

        Ok(Self(components))
    }

    /// Child indices from the master key downwards, hardened bit included
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Whether every component is hardened
    pub fn is_fully_hardened(&self) -> bool {
        self.0.iter().all(|index| *index >= HARDENED_OFFSET)
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        let mut parts = path.split('/');
        if parts.next() != Some("m") {
            return Err(Error::InvalidDerivationPath(path.to_string()));
        }

        let mut result = Vec::new();
        for component in parts {
            let (digits, hardened) = match component.strip_suffix('\'').or_else(|| component.strip_suffix('h')) {
                Some(digits) => (digits, true),
                None => (component, false),
            };

            let index = digits.parse::<u32>()
                .ok()
                .filter(|index| *index < HARDENED_OFFSET)
                .ok_or_else(|| Error::InvalidDerivationPath(format!("Invalid derivation path component: {}", component)))?;

            result.push(if hardened { index | HARDENED_OFFSET } else { index });
        }

        Ok(Self(result))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            if *index >= HARDENED_OFFSET {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

/// An account derived from a mnemonic
///
/// The private key is wiped from memory when the value is dropped and never
/// shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedAccount {
    public_key: String,
    private_key: String,
    account_index: u32,
}

impl DerivedAccount {
    pub(crate) fn new(public_key: String, private_key: String, account_index: u32) -> Self {
        Self { public_key, private_key, account_index }
    }

    /// Address in the chain's native encoding
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Private key in the chain's native encoding
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn account_index(&self) -> u32 {
        self.account_index
    }
}

impl fmt::Debug for DerivedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedAccount")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("account_index", &self.account_index)
            .finish()
    }
}

impl Drop for DerivedAccount {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Derive account `index` on `chain` from a mnemonic phrase
pub fn derive_account(phrase: &str, chain: Chain, index: u32) -> Result<DerivedAccount> {
    match chain {
        Chain::Solana => super::solana::derive_solana_account(phrase, index),
        Chain::Ethereum => super::ethereum::derive_ethereum_account(phrase, index),
    }
}

/// Derive an account for a chain given by identifier, e.g. `"solana"`
///
/// Unknown identifiers fail before any key material is computed.
pub fn derive_account_by_id(phrase: &str, chain_id: &str, index: u32) -> Result<DerivedAccount> {
    let chain = chain_id.parse::<Chain>()?;
    derive_account(phrase, chain, index)
}

/// HMAC-SHA512 split into a secret left half and a public right half
pub(crate) fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<(Zeroizing<[u8; 32]>, [u8; 32])> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    for part in parts {
        mac.update(part);
    }
    let output = mac.finalize().into_bytes();

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[0..32]);
    right.copy_from_slice(&output[32..64]);

    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_from_str() {
        assert_eq!("solana".parse::<Chain>().unwrap(), Chain::Solana);
        assert_eq!("ethereum".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert_eq!(
            "bitcoin".parse::<Chain>(),
            Err(Error::UnsupportedChain("bitcoin".to_string()))
        );
    }

    #[test]
    fn test_chain_from_str_is_exact() {
        for id in ["Solana", "SOLANA", " ethereum", " Ethereum ", "ethereum\n", ""] {
            assert_eq!(id.parse::<Chain>(), Err(Error::UnsupportedChain(id.to_string())));
        }
    }

    #[test]
    fn test_chain_serde() {
        assert_eq!(serde_json::to_string(&Chain::Solana).unwrap(), "\"solana\"");
        let chain: Chain = serde_json::from_str("\"ethereum\"").unwrap();
        assert_eq!(chain, Chain::Ethereum);
    }

    #[test]
    fn test_account_paths() {
        let solana = DerivationPath::for_account(Chain::Solana, 3).unwrap();
        assert_eq!(solana.to_string(), "m/44'/501'/3'/0'");
        assert!(solana.is_fully_hardened());

        let ethereum = DerivationPath::for_account(Chain::Ethereum, 7).unwrap();
        assert_eq!(ethereum.to_string(), "m/44'/60'/0'/0/7");
        assert!(!ethereum.is_fully_hardened());
    }

    #[test]
    fn test_account_index_out_of_range() {
        assert!(DerivationPath::for_account(Chain::Ethereum, MAX_ACCOUNT_INDEX).is_ok());
        assert!(matches!(
            DerivationPath::for_account(Chain::Solana, HARDENED_OFFSET),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_derivation_path() {
        let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
        assert_eq!(path, DerivationPath::for_account(Chain::Ethereum, 0).unwrap());

        let alt: DerivationPath = "m/44h/501h/0h/0h".parse().unwrap();
        assert_eq!(alt, DerivationPath::for_account(Chain::Solana, 0).unwrap());

        let master: DerivationPath = "m".parse().unwrap();
        assert!(master.components().is_empty());
    }

    #[test]
    fn test_parse_invalid_derivation_path() {
        for path in ["", "44'/60'", "m/", "m/abc", "m/2147483648", "m//0"] {
            assert!(path.parse::<DerivationPath>().is_err(), "accepted {path}");
        }
    }

    #[test]
    fn test_derived_account_debug_redacts_private_key() {
        let account = DerivedAccount::new("addr".to_string(), "secret".to_string(), 0);
        let debug = format!("{:?}", account);
        assert!(debug.contains("addr"));
        assert!(!debug.contains("secret"));
    }
}
