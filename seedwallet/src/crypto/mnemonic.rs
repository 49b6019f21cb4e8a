//! Mnemonic phrase generation, validation and seed stretching

use std::fmt;

use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Number of words in every phrase this library accepts or produces
pub const WORD_COUNT: usize = 12;

/// 12 words encode 128 bits of entropy
const ENTROPY_BYTES: usize = 16;

/// Length of a BIP39 seed in bytes
pub const SEED_LENGTH: usize = 64;

/// A 512-bit BIP39 seed, wiped from memory on drop
#[derive(Clone)]
pub struct Seed(Zeroizing<[u8; SEED_LENGTH]>);

impl Seed {
    /// Get the raw seed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// Generate a new random 12-word mnemonic phrase
pub fn generate_mnemonic() -> Result<String> {
    let mut entropy = Zeroizing::new([0u8; ENTROPY_BYTES]);
    OsRng.fill_bytes(&mut entropy[..]);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..])
        .map_err(|e| Error::Mnemonic(e.to_string()))?;

    Ok(mnemonic.to_string())
}

/// Collapse surrounding and repeated whitespace into single spaces
pub fn normalize_phrase(candidate: &str) -> String {
    candidate.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check a phrase and return its normalized form, or the reason it was rejected
pub fn check_mnemonic(candidate: &str) -> Result<String> {
    let normalized = normalize_phrase(candidate);
    parse_normalized(&normalized)?;
    Ok(normalized)
}

/// Validate a mnemonic phrase
///
/// Returns `true` only for exactly twelve words that pass the BIP39 checksum.
pub fn validate_mnemonic(candidate: &str) -> bool {
    check_mnemonic(candidate).is_ok()
}

/// Stretch a mnemonic phrase into its 512-bit seed (empty passphrase)
pub fn derive_seed(phrase: &str) -> Result<Seed> {
    let mnemonic = parse_normalized(&normalize_phrase(phrase))?;
    Ok(Seed(Zeroizing::new(mnemonic.to_seed_normalized(""))))
}

fn parse_normalized(normalized: &str) -> Result<Mnemonic> {
    let word_count = normalized.split(' ').filter(|w| !w.is_empty()).count();
    if word_count != WORD_COUNT {
        return Err(Error::InvalidWordCount(word_count));
    }

    Mnemonic::parse_in_normalized(Language::English, normalized)
        .map_err(|e| Error::InvalidMnemonic(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_mnemonic() {
        let mnemonic = generate_mnemonic().unwrap();
        assert!(validate_mnemonic(&mnemonic));

        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), WORD_COUNT);
    }

    #[test]
    fn test_generate_mnemonic_uses_fresh_entropy() {
        let first = generate_mnemonic().unwrap();
        let second = generate_mnemonic().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_bip39_vectors() {
        let vectors = [
            ABANDON_ABOUT,
            "legal winner thank year wave sausage worth useful legal winner thank yellow",
            "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            "ozone drill grab fiber curtain grace pudding thank cruise elder eight picnic",
            "scheme spot photo card baby mountain device kick cradle pact join borrow",
            "cat swing flag economy stadium alone churn speed unique patch report train",
            "vessel ladder alter error federal sibling chat ability sun glass valve picture",
        ];

        for phrase in vectors {
            assert!(validate_mnemonic(phrase), "rejected {phrase}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_checksum() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(!validate_mnemonic(phrase));
        assert!(matches!(check_mnemonic(phrase), Err(Error::InvalidMnemonic(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_word_count() {
        assert!(!validate_mnemonic(""));
        assert!(!validate_mnemonic("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"));

        // A valid 24-word phrase is still rejected: only 12 words are supported
        let twenty_four = format!("{} art", ["abandon"; 23].join(" "));
        assert_eq!(check_mnemonic(&twenty_four), Err(Error::InvalidWordCount(24)));
    }

    #[test]
    fn test_validate_rejects_unknown_word() {
        let phrase = "invalid mnemonic phrase test test test test test test test test test";
        assert!(!validate_mnemonic(phrase));
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let messy = format!("  {}\n", ABANDON_ABOUT.replace(' ', "  \t"));
        assert!(validate_mnemonic(&messy));
        assert_eq!(check_mnemonic(&messy).unwrap(), ABANDON_ABOUT);
    }

    #[test]
    fn test_derive_seed() {
        let seed = derive_seed(ABANDON_ABOUT).unwrap();

        // Known test vector for this phrase with an empty passphrase
        assert_eq!(seed.as_bytes().len(), SEED_LENGTH);
        assert_eq!(hex::encode(&seed.as_bytes()[0..8]), "5eb00bbddcf069b3");
        assert_eq!(derive_seed(ABANDON_ABOUT).unwrap().as_bytes(), seed.as_bytes());
    }

    #[test]
    fn test_derive_seed_rejects_invalid_phrase() {
        assert!(derive_seed("not a mnemonic").is_err());
    }

    #[test]
    fn test_seed_debug_is_redacted() {
        let seed = derive_seed(ABANDON_ABOUT).unwrap();
        assert_eq!(format!("{:?}", seed), "Seed(<redacted>)");
    }
}
