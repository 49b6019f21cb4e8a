//! Tests for key derivation across chains

use seedwallet::account::{next_index, validate_address};
use seedwallet::crypto::keys::*;
use seedwallet::crypto::mnemonic::*;
use seedwallet::Error;

const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const LEGAL_WINNER: &str = "legal winner thank year wave sausage worth useful legal winner thank yellow";

#[test]
fn test_ethereum_reference_vector() {
    let account = derive_account(ABANDON_ABOUT, Chain::Ethereum, 0).unwrap();

    assert_eq!(account.public_key(), "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
    assert!(validate_address(account.public_key(), Chain::Ethereum));
}

#[test]
fn test_solana_reference_vector() {
    let account = derive_account(ABANDON_ABOUT, Chain::Solana, 0).unwrap();

    assert_eq!(account.public_key(), "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
    assert!(validate_address(account.public_key(), Chain::Solana));
}

#[test]
fn test_derivation_is_deterministic() {
    for chain in Chain::ALL {
        for index in [0, 1, 42] {
            let first = derive_account(LEGAL_WINNER, chain, index).unwrap();
            let second = derive_account(LEGAL_WINNER, chain, index).unwrap();
            assert_eq!(first, second, "{chain} index {index}");
        }
    }
}

#[test]
fn test_derivation_ignores_extra_whitespace() {
    let messy = format!("  {}  ", ABANDON_ABOUT.replace(' ', "\n"));
    let clean = derive_account(ABANDON_ABOUT, Chain::Solana, 2).unwrap();
    let normalized = derive_account(&messy, Chain::Solana, 2).unwrap();
    assert_eq!(clean, normalized);
}

#[test]
fn test_chain_isolation() {
    for index in 0..3 {
        let solana = derive_account(ABANDON_ABOUT, Chain::Solana, index).unwrap();
        let ethereum = derive_account(ABANDON_ABOUT, Chain::Ethereum, index).unwrap();

        assert_ne!(solana.public_key(), ethereum.public_key());
        assert_ne!(solana.private_key(), ethereum.private_key());
        assert!(validate_address(solana.public_key(), Chain::Solana));
        assert!(!validate_address(solana.public_key(), Chain::Ethereum));
        assert!(!validate_address(ethereum.public_key(), Chain::Solana));
    }
}

#[test]
fn test_index_sensitivity() {
    for chain in Chain::ALL {
        let accounts: Vec<DerivedAccount> = (0..4)
            .map(|index| derive_account(ABANDON_ABOUT, chain, index).unwrap())
            .collect();

        for (i, a) in accounts.iter().enumerate() {
            for b in &accounts[i + 1..] {
                assert_ne!(a.public_key(), b.public_key());
            }
        }
    }
}

#[test]
fn test_different_mnemonics_differ() {
    let a = derive_account(ABANDON_ABOUT, Chain::Ethereum, 0).unwrap();
    let b = derive_account(LEGAL_WINNER, Chain::Ethereum, 0).unwrap();
    assert_ne!(a.public_key(), b.public_key());
}

#[test]
fn test_unsupported_chain() {
    let result = derive_account_by_id(ABANDON_ABOUT, "bitcoin", 0);
    assert_eq!(result, Err(Error::UnsupportedChain("bitcoin".to_string())));
}

#[test]
fn test_chain_id_must_match_exactly() {
    for id in ["SOLANA", "Ethereum", " Ethereum\n"] {
        assert_eq!(
            derive_account_by_id(ABANDON_ABOUT, id, 0),
            Err(Error::UnsupportedChain(id.to_string()))
        );
    }
}

#[test]
fn test_derive_by_chain_id() {
    let by_id = derive_account_by_id(ABANDON_ABOUT, "ethereum", 0).unwrap();
    let by_enum = derive_account(ABANDON_ABOUT, Chain::Ethereum, 0).unwrap();
    assert_eq!(by_id, by_enum);
}

#[test]
fn test_invalid_mnemonic_is_rejected() {
    let bad_checksum = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
    assert!(matches!(
        derive_account(bad_checksum, Chain::Solana, 0),
        Err(Error::InvalidMnemonic(_))
    ));
    assert_eq!(
        derive_account("abandon about", Chain::Ethereum, 0),
        Err(Error::InvalidWordCount(2))
    );
}

#[test]
fn test_index_out_of_range() {
    for chain in Chain::ALL {
        let result = derive_account(ABANDON_ABOUT, chain, MAX_ACCOUNT_INDEX + 1);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}

#[test]
fn test_generated_mnemonic_derives_accounts() {
    let mnemonic = generate_mnemonic().unwrap();
    assert!(validate_mnemonic(&mnemonic));

    let accounts: Vec<DerivedAccount> = (0..3)
        .map(|index| derive_account(&mnemonic, Chain::Solana, index).unwrap())
        .collect();
    assert_eq!(next_index(&accounts), 3);
}
