//! Account index allocation
//!
//! Indices within a wallet start at 0 and only grow. The allocator is a pure
//! function of the accounts the caller supplies; serializing concurrent
//! allocations for the same wallet is the caller's job (see the repository
//! in the API crate, which rejects duplicate `(wallet, index)` pairs).

use crate::crypto::keys::DerivedAccount;

/// Anything that occupies an account index in a wallet
pub trait IndexedAccount {
    fn account_index(&self) -> u32;
}

impl IndexedAccount for u32 {
    fn account_index(&self) -> u32 {
        *self
    }
}

impl<T: IndexedAccount + ?Sized> IndexedAccount for &T {
    fn account_index(&self) -> u32 {
        (**self).account_index()
    }
}

impl IndexedAccount for DerivedAccount {
    fn account_index(&self) -> u32 {
        DerivedAccount::account_index(self)
    }
}

/// Next index for a wallet holding `existing` accounts
///
/// Returns 0 for an empty wallet and one past the highest index otherwise.
/// For a wallet without gaps this is the account count.
pub fn next_index<A: IndexedAccount>(existing: &[A]) -> u32 {
    existing
        .iter()
        .map(|account| account.account_index())
        .max()
        .map_or(0, |highest| highest.saturating_add(1))
}

/// Next index, never below the wallet's persisted high-water mark
///
/// The high-water mark records the smallest index never handed out, so an
/// index freed by deleting an account is not assigned again.
pub fn next_index_with_high_water<A: IndexedAccount>(existing: &[A], high_water: u32) -> u32 {
    next_index(existing).max(high_water)
}
