//! Encryption of secrets at rest
//!
//! Seed phrases and private keys are sealed with AES-256-GCM under the server
//! vault key. Stored form is base64 of `nonce || ciphertext`. Seed phrases are
//! looked up through an HMAC-SHA256 fingerprint keyed by a subkey of the vault
//! key, so the repository never needs the plaintext to find a user.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

const NONCE_LENGTH: usize = 12;

/// Domain separator for the fingerprint subkey
const FINGERPRINT_DOMAIN: &[u8] = b"seedwallet/seed-fingerprint/v1";

/// Vault errors
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Invalid vault key")]
    InvalidKey,
    #[error("Encryption failed")]
    Encryption,
    #[error("Decryption failed")]
    Decryption,
    #[error("Malformed ciphertext: {0}")]
    Malformed(String),
}

impl From<VaultError> for crate::error::ServiceError {
    fn from(error: VaultError) -> Self {
        crate::error::ServiceError::Encryption(error.to_string())
    }
}

/// Seals and opens secrets with the server vault key
#[derive(Clone)]
pub struct SecretVault {
    cipher: Aes256Gcm,
    /// HMAC keyed with the fingerprint subkey, cloned for each fingerprint
    fingerprint_mac: HmacSha256,
}

impl SecretVault {
    /// Create a vault from a 32-byte key
    pub fn new(key: &[u8; 32]) -> Result<Self, VaultError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

        let mut mac = <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| VaultError::InvalidKey)?;
        mac.update(FINGERPRINT_DOMAIN);
        let mut fingerprint_key = Zeroizing::new([0u8; 32]);
        fingerprint_key.copy_from_slice(&mac.finalize().into_bytes());

        let fingerprint_mac = <HmacSha256 as Mac>::new_from_slice(&fingerprint_key[..])
            .map_err(|_| VaultError::InvalidKey)?;

        Ok(Self { cipher, fingerprint_mac })
    }

    /// Encrypt a secret string
    pub fn encrypt(&self, plaintext: &str) -> Result<String, VaultError> {
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = self.cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|_| VaultError::Encryption)?;

        let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);

        Ok(general_purpose::STANDARD.encode(sealed))
    }

    /// Decrypt a value produced by [`SecretVault::encrypt`]
    pub fn decrypt(&self, sealed: &str) -> Result<Zeroizing<String>, VaultError> {
        let sealed = general_purpose::STANDARD
            .decode(sealed)
            .map_err(|e| VaultError::Malformed(e.to_string()))?;

        if sealed.len() < NONCE_LENGTH {
            return Err(VaultError::Malformed("ciphertext too short".to_string()));
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LENGTH);

        let plaintext = Zeroizing::new(
            self.cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| VaultError::Decryption)?,
        );

        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| VaultError::Malformed("plaintext is not UTF-8".to_string()))?;

        Ok(Zeroizing::new(text.to_string()))
    }

    /// Keyed fingerprint of a normalized seed phrase, hex encoded
    pub fn fingerprint(&self, phrase: &str) -> String {
        let mut mac = self.fingerprint_mac.clone();
        mac.update(phrase.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "legal winner thank year wave sausage worth useful legal winner thank yellow";

    #[test]
    fn test_encrypt_decrypt() {
        let vault = SecretVault::new(&[1u8; 32]).unwrap();

        let sealed = vault.encrypt(PHRASE).unwrap();
        assert!(!sealed.contains("legal"));
        assert_eq!(vault.decrypt(&sealed).unwrap().as_str(), PHRASE);
    }

    #[test]
    fn test_nonce_is_fresh() {
        let vault = SecretVault::new(&[1u8; 32]).unwrap();
        assert_ne!(vault.encrypt(PHRASE).unwrap(), vault.encrypt(PHRASE).unwrap());
    }

    #[test]
    fn test_tampered_ciphertext_is_rejected() {
        let vault = SecretVault::new(&[1u8; 32]).unwrap();
        let mut sealed = general_purpose::STANDARD.decode(vault.encrypt(PHRASE).unwrap()).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;

        let tampered = general_purpose::STANDARD.encode(sealed);
        assert!(matches!(vault.decrypt(&tampered), Err(VaultError::Decryption)));
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let sealed = SecretVault::new(&[1u8; 32]).unwrap().encrypt(PHRASE).unwrap();
        let other = SecretVault::new(&[2u8; 32]).unwrap();
        assert!(matches!(other.decrypt(&sealed), Err(VaultError::Decryption)));
    }

    #[test]
    fn test_malformed_input() {
        let vault = SecretVault::new(&[1u8; 32]).unwrap();
        assert!(matches!(vault.decrypt("***"), Err(VaultError::Malformed(_))));
        assert!(matches!(vault.decrypt("AAAA"), Err(VaultError::Malformed(_))));
    }

    #[test]
    fn test_fingerprint_is_keyed_and_stable() {
        let vault = SecretVault::new(&[1u8; 32]).unwrap();
        let other = SecretVault::new(&[2u8; 32]).unwrap();

        assert_eq!(vault.fingerprint(PHRASE), vault.fingerprint(PHRASE));
        assert_ne!(vault.fingerprint(PHRASE), other.fingerprint(PHRASE));
        assert_eq!(vault.fingerprint(PHRASE).len(), 64);
    }

    #[test]
    fn test_fingerprint_matches_subkey_hmac() {
        let key = [1u8; 32];
        let vault = SecretVault::new(&key).unwrap();

        let mut mac = <HmacSha256 as Mac>::new_from_slice(&key).unwrap();
        mac.update(FINGERPRINT_DOMAIN);
        let subkey = mac.finalize().into_bytes();

        let mut mac = <HmacSha256 as Mac>::new_from_slice(&subkey).unwrap();
        mac.update(PHRASE.as_bytes());
        assert_eq!(vault.fingerprint(PHRASE), hex::encode(mac.finalize().into_bytes()));

        // Each fingerprint starts from a fresh MAC state
        assert_eq!(vault.fingerprint("other"), vault.fingerprint("other"));
    }
}
