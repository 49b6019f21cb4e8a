//! User, wallet and account records

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use seedwallet::account::IndexedAccount;
use seedwallet::Chain;

/// A user owning exactly one seed phrase
#[derive(Debug, Clone)]
pub struct UserEntity {
    pub id: Uuid,
    /// bcrypt hash; `None` for users created from a seed phrase alone
    pub password_hash: Option<String>,
    /// Seed phrase sealed by the vault
    pub encrypted_seed_phrase: String,
    /// Keyed fingerprint of the normalized seed phrase
    pub seed_fingerprint: String,
    pub created_at: DateTime<Utc>,
}

/// A named wallet pinned to one chain
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub blockchain: Chain,
    /// Smallest account index never handed out in this wallet
    pub next_account_index: u32,
    pub created_at: DateTime<Utc>,
}

impl WalletEntity {
    pub fn new(user_id: Uuid, name: String, blockchain: Chain) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            blockchain,
            next_account_index: 0,
            created_at: Utc::now(),
        }
    }
}

/// A derived account; the private key is only ever stored sealed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEntity {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub name: String,
    pub public_key: String,
    pub account_index: u32,
    #[serde(skip_serializing)]
    pub encrypted_private_key: String,
    pub created_at: DateTime<Utc>,
}

impl IndexedAccount for AccountEntity {
    fn account_index(&self) -> u32 {
        self.account_index
    }
}

/// A wallet together with its accounts, ordered by index
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletWithAccounts {
    #[serde(flatten)]
    pub wallet: WalletEntity,
    pub accounts: Vec<AccountEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_serialization_omits_private_key() {
        let account = AccountEntity {
            id: Uuid::new_v4(),
            wallet_id: Uuid::new_v4(),
            name: "Main".to_string(),
            public_key: "0x9858EfFD232B4033E47d90003D41EC34EcaEda94".to_string(),
            account_index: 0,
            encrypted_private_key: "sealed".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["publicKey"], "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
        assert_eq!(json["accountIndex"], 0);
        assert!(json.get("encryptedPrivateKey").is_none());
    }

    #[test]
    fn test_wallet_serialization() {
        let wallet = WalletWithAccounts {
            wallet: WalletEntity::new(Uuid::new_v4(), "Savings".to_string(), Chain::Solana),
            accounts: vec![],
        };

        let json = serde_json::to_value(&wallet).unwrap();
        assert_eq!(json["name"], "Savings");
        assert_eq!(json["blockchain"], "solana");
        assert_eq!(json["accounts"], serde_json::json!([]));
    }
}
