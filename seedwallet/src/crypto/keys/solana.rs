//! Solana key derivation (SLIP-0010 over ed25519)

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::crypto::mnemonic::derive_seed;
use crate::error::{Error, Result};
use super::derivation::{hmac_sha512, Chain, DerivationPath, DerivedAccount};

/// HMAC key for the SLIP-0010 ed25519 master node
const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// Derive Solana account `index` at `m/44'/501'/{index}'/0'`
///
/// The public key is base58 encoded; the private key is the hex encoded
/// 64-byte keypair (secret followed by public key).
pub fn derive_solana_account(phrase: &str, index: u32) -> Result<DerivedAccount> {
    let path = DerivationPath::for_account(Chain::Solana, index)?;
    let seed = derive_seed(phrase)?;
    let signing_key = derive_signing_key(seed.as_bytes(), &path)?;

    let keypair_bytes = Zeroizing::new(signing_key.to_keypair_bytes());

    Ok(DerivedAccount::new(
        public_key_to_address(&signing_key.verifying_key()),
        hex::encode(&keypair_bytes[..]),
        index,
    ))
}

/// Derive an ed25519 signing key from a seed and a fully hardened path
pub fn derive_signing_key(seed: &[u8], path: &DerivationPath) -> Result<SigningKey> {
    if !path.is_fully_hardened() {
        return Err(Error::InvalidDerivationPath(format!(
            "ed25519 derivation requires hardened components: {}",
            path
        )));
    }

    let (mut secret_key, mut chain_code) = hmac_sha512(ED25519_SEED_KEY, &[seed])?;

    for index in path.components() {
        (secret_key, chain_code) = hmac_sha512(
            &chain_code,
            &[&[0u8][..], &secret_key[..], &index.to_be_bytes()[..]],
        )?;
    }

    Ok(SigningKey::from_bytes(&secret_key))
}

/// Get the Solana address (base58 public key) of a verifying key
pub fn public_key_to_address(public_key: &VerifyingKey) -> String {
    bs58::encode(public_key.as_bytes()).into_string()
}
