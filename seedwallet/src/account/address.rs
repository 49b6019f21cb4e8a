//! Address validation

use crate::crypto::keys::Chain;
use crate::crypto::keys::ethereum::to_checksum_address;

/// Validate an address for a specific blockchain
///
/// Ethereum addresses must be `0x` followed by 40 hex digits; all-lowercase or
/// all-uppercase digits are accepted as unchecksummed, mixed case must match
/// EIP-55. Solana addresses must be base58 decoding to 32 bytes.
pub fn validate_address(address: &str, chain: Chain) -> bool {
    match chain {
        Chain::Ethereum => validate_ethereum_address(address),
        Chain::Solana => validate_solana_address(address),
    }
}

fn validate_ethereum_address(address: &str) -> bool {
    let digits = match address.strip_prefix("0x") {
        Some(digits) if digits.len() == 40 => digits,
        _ => return false,
    };

    let bytes: [u8; 20] = match hex::decode(digits).ok().and_then(|b| b.try_into().ok()) {
        Some(bytes) => bytes,
        None => return false,
    };

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return to_checksum_address(&bytes) == address;
    }

    true
}

fn validate_solana_address(address: &str) -> bool {
    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ethereum_address() {
        // Valid Ethereum addresses
        assert!(validate_address("0x9858EfFD232B4033E47d90003D41EC34EcaEda94", Chain::Ethereum));
        assert!(validate_address("0x9858effd232b4033e47d90003d41ec34ecaeda94", Chain::Ethereum));

        // Invalid Ethereum addresses
        assert!(!validate_address("0x9858EfFD232B4033E47d90003D41EC34EcaEda9", Chain::Ethereum)); // Too short
        assert!(!validate_address("0x9858EfFD232B4033E47d90003D41EC34EcaEda941", Chain::Ethereum)); // Too long
        assert!(!validate_address("9858EfFD232B4033E47d90003D41EC34EcaEda94", Chain::Ethereum)); // Missing 0x
        assert!(!validate_address("0xZZ58EfFD232B4033E47d90003D41EC34EcaEda94", Chain::Ethereum)); // Invalid hex
        assert!(!validate_address("0x9858efFD232B4033E47d90003D41EC34EcaEda94", Chain::Ethereum)); // Bad checksum
    }

    #[test]
    fn test_validate_solana_address() {
        let address = bs58::encode([7u8; 32]).into_string();
        assert!(validate_address(&address, Chain::Solana));

        let short = bs58::encode([7u8; 31]).into_string();
        assert!(!validate_address(&short, Chain::Solana));
        assert!(!validate_address("0OIl", Chain::Solana)); // Not base58
    }

    #[test]
    fn test_addresses_do_not_cross_chains() {
        let solana = bs58::encode([7u8; 32]).into_string();
        assert!(!validate_address(&solana, Chain::Ethereum));
        assert!(!validate_address("0x9858EfFD232B4033E47d90003D41EC34EcaEda94", Chain::Solana));
    }
}
