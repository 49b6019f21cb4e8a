//! Ethereum key derivation (BIP32 over secp256k1)

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::crypto::mnemonic::derive_seed;
use crate::error::{Error, Result};
use super::derivation::{hmac_sha512, Chain, DerivationPath, DerivedAccount, HARDENED_OFFSET};

/// HMAC key for the BIP32 master node
const BITCOIN_SEED_KEY: &[u8] = b"Bitcoin seed";

/// Derive Ethereum account `index` at `m/44'/60'/0'/0/{index}`
///
/// The public key is the EIP-55 checksummed address; the private key is the
/// `0x` prefixed hex encoding of the 32-byte secret.
pub fn derive_ethereum_account(phrase: &str, index: u32) -> Result<DerivedAccount> {
    let path = DerivationPath::for_account(Chain::Ethereum, index)?;
    let seed = derive_seed(phrase)?;
    let secret_key = derive_secret_key(seed.as_bytes(), &path)?;

    let secp = Secp256k1::new();
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    let secret_bytes = Zeroizing::new(secret_key.secret_bytes());

    Ok(DerivedAccount::new(
        public_key_to_address(&public_key),
        format!("0x{}", hex::encode(&secret_bytes[..])),
        index,
    ))
}

/// Derive a secp256k1 secret key from a seed and a derivation path
pub fn derive_secret_key(seed: &[u8], path: &DerivationPath) -> Result<SecretKey> {
    let secp = Secp256k1::new();

    let (master_key, mut chain_code) = hmac_sha512(BITCOIN_SEED_KEY, &[seed])?;
    let mut secret_key = SecretKey::from_slice(&master_key[..])
        .map_err(|e| Error::KeyDerivation(format!("Invalid master key: {}", e)))?;

    for index in path.components() {
        let index_bytes = index.to_be_bytes();
        let (tweak, child_chain_code) = if *index >= HARDENED_OFFSET {
            let parent_bytes = Zeroizing::new(secret_key.secret_bytes());
            hmac_sha512(&chain_code, &[&[0u8][..], &parent_bytes[..], &index_bytes[..]])?
        } else {
            let parent_public_key = PublicKey::from_secret_key(&secp, &secret_key);
            hmac_sha512(&chain_code, &[&parent_public_key.serialize()[..], &index_bytes[..]])?
        };

        // child = parse256(IL) + parent (mod n); IL >= n or a zero child is invalid
        let tweak = Scalar::from_be_bytes(*tweak)
            .map_err(|_| Error::KeyDerivation(format!("Derived key out of range at index {}", index)))?;
        secret_key = secret_key.add_tweak(&tweak)
            .map_err(|e| Error::KeyDerivation(format!("Key addition error: {}", e)))?;
        chain_code = child_chain_code;
    }

    Ok(secret_key)
}

/// Get the EIP-55 checksummed Ethereum address of a public key
pub fn public_key_to_address(public_key: &PublicKey) -> String {
    let uncompressed = public_key.serialize_uncompressed();

    // Skip the first byte (0x04) and hash the rest
    let key_hash = Keccak256::digest(&uncompressed[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&key_hash[12..]);

    to_checksum_address(&address)
}

/// Format a 20-byte address with the EIP-55 mixed-case checksum
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    checksummed
}
