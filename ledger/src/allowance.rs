//! Delegated spending approvals.

use std::collections::BTreeMap;

use protocoin_types::{Account, TokenAmount};

use crate::balances::BalanceBook;
use crate::error::LedgerError;

/// Allowances keyed by `(owner, spender)`.
///
/// An allowance is set absolutely by `approve` and only ever decreases through
/// `transfer_from`. Absent entries read as zero.
#[derive(Clone, Debug, Default)]
pub struct AllowanceBook {
    allowances: BTreeMap<(Account, Account), TokenAmount>,
}

impl AllowanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount `spender` may still move out of `owner`'s balance.
    pub fn allowance(&self, owner: &Account, spender: &Account) -> TokenAmount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Set the allowance of `spender` over `owner`'s balance, replacing any prior value.
    pub fn approve(&mut self, owner: &Account, spender: &Account, amount: TokenAmount) {
        let key = (owner.clone(), spender.clone());
        if amount.is_zero() {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount);
        }
    }

    /// Move `amount` from `owner` to `to` on behalf of `spender`.
    ///
    /// The allowance is checked before the balance, so a call violating both
    /// reports `InsufficientAllowance`. The allowance decrement and the balance
    /// transfer commit together or not at all.
    pub fn transfer_from(
        &mut self,
        balances: &mut BalanceBook,
        spender: &Account,
        owner: &Account,
        to: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(owner, spender);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientAllowance {
                owner: owner.clone(),
                spender: spender.clone(),
                needed: amount,
                available,
            })?;
        balances.transfer(owner, to, amount)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    /// All non-zero allowances as `(owner, spender, amount)`, ordered by owner then spender.
    pub fn entries(&self) -> impl Iterator<Item = (&Account, &Account, TokenAmount)> + '_ {
        self.allowances
            .iter()
            .map(|((owner, spender), amount)| (owner, spender, *amount))
    }

    pub(crate) fn from_entries(
        entries: impl IntoIterator<Item = (Account, Account, TokenAmount)>,
    ) -> Self {
        let mut book = Self::new();
        for (owner, spender, amount) in entries {
            book.approve(&owner, &spender, amount);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(s: &str) -> Account {
        Account::new(s)
    }

    fn setup() -> (BalanceBook, AllowanceBook) {
        let mut balances = BalanceBook::new();
        balances
            .credit_new_supply(&acct("owner"), TokenAmount::new(100))
            .unwrap();
        (balances, AllowanceBook::new())
    }

    #[test]
    fn approve_overwrites_rather_than_adds() {
        let mut book = AllowanceBook::new();
        book.approve(&acct("o"), &acct("s"), TokenAmount::new(10));
        book.approve(&acct("o"), &acct("s"), TokenAmount::new(3));
        assert_eq!(book.allowance(&acct("o"), &acct("s")), TokenAmount::new(3));
    }

    #[test]
    fn allowance_is_directional() {
        let mut book = AllowanceBook::new();
        book.approve(&acct("o"), &acct("s"), TokenAmount::new(10));
        assert_eq!(book.allowance(&acct("s"), &acct("o")), TokenAmount::ZERO);
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let (mut balances, mut book) = setup();
        book.approve(&acct("owner"), &acct("spender"), TokenAmount::new(10));
        book.transfer_from(
            &mut balances,
            &acct("spender"),
            &acct("owner"),
            &acct("spender"),
            TokenAmount::new(5),
        )
        .unwrap();
        assert_eq!(
            book.allowance(&acct("owner"), &acct("spender")),
            TokenAmount::new(5)
        );
        assert_eq!(balances.balance_of(&acct("owner")), TokenAmount::new(95));
        assert_eq!(balances.balance_of(&acct("spender")), TokenAmount::new(5));
    }

    #[test]
    fn allowance_checked_before_balance() {
        let mut balances = BalanceBook::new();
        let mut book = AllowanceBook::new();
        let err = book
            .transfer_from(
                &mut balances,
                &acct("spender"),
                &acct("owner"),
                &acct("to"),
                TokenAmount::new(1),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
    }

    #[test]
    fn insufficient_balance_keeps_allowance() {
        let mut balances = BalanceBook::new();
        let mut book = AllowanceBook::new();
        book.approve(&acct("broke"), &acct("spender"), TokenAmount::new(1));
        let err = book
            .transfer_from(
                &mut balances,
                &acct("spender"),
                &acct("broke"),
                &acct("spender"),
                TokenAmount::new(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                account: acct("broke"),
                needed: TokenAmount::new(1),
                available: TokenAmount::ZERO,
            }
        );
        assert_eq!(
            book.allowance(&acct("broke"), &acct("spender")),
            TokenAmount::new(1)
        );
    }

    #[test]
    fn exhausted_allowance_is_removed_from_entries() {
        let (mut balances, mut book) = setup();
        book.approve(&acct("owner"), &acct("spender"), TokenAmount::new(5));
        book.transfer_from(
            &mut balances,
            &acct("spender"),
            &acct("owner"),
            &acct("to"),
            TokenAmount::new(5),
        )
        .unwrap();
        assert_eq!(book.entries().count(), 0);
    }
}
