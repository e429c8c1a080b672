//! Owner predicate for faucet configuration.

use protocoin_types::Account;

/// Holds the single owner identity fixed at genesis.
///
/// There is no ownership transfer: the owner is set once at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessGuard {
    owner: Account,
}

impl AccessGuard {
    pub fn new(owner: Account) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &Account {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Account) -> bool {
        *caller == self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_owner_passes() {
        let guard = AccessGuard::new(Account::new("alice"));
        assert!(guard.is_owner(&Account::new("alice")));
        assert!(!guard.is_owner(&Account::new("bob")));
        assert!(!guard.is_owner(&Account::new("Alice")));
    }
}
