//! Ledger core: balances and total supply.

use std::collections::BTreeMap;

use protocoin_types::{Account, TokenAmount};

use crate::error::LedgerError;

/// Balances per account plus the total supply.
///
/// Invariant: the sum of all balances equals `total_supply`. Transfers move
/// value between accounts; only [`BalanceBook::credit_new_supply`] creates it.
/// Accounts are never registered: an unseen account has a zero balance.
#[derive(Clone, Debug, Default)]
pub struct BalanceBook {
    balances: BTreeMap<Account, TokenAmount>,
    total_supply: TokenAmount,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    /// Balance of `account`, zero for accounts never credited.
    pub fn balance_of(&self, account: &Account) -> TokenAmount {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Fail with `InsufficientBalance` unless `account` holds at least `amount`.
    pub fn ensure_balance(&self, account: &Account, amount: TokenAmount) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: account.clone(),
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Both balances change or neither does. A zero amount, or a transfer to
    /// oneself, succeeds without changing any balance.
    pub fn transfer(
        &mut self,
        from: &Account,
        to: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        self.ensure_balance(from, amount)?;
        if amount.is_zero() || from == to {
            return Ok(());
        }
        let from_after = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        let to_after = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set_balance(from, from_after);
        self.set_balance(to, to_after);
        Ok(())
    }

    /// Credit freshly issued supply to `to`, growing the total supply by the same amount.
    pub fn credit_new_supply(&mut self, to: &Account, amount: TokenAmount) -> Result<(), LedgerError> {
        let supply_after = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let to_after = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.total_supply = supply_after;
        self.set_balance(to, to_after);
        Ok(())
    }

    /// Accounts with a non-zero balance, in account order.
    pub fn holders(&self) -> impl Iterator<Item = (&Account, TokenAmount)> + '_ {
        self.balances.iter().map(|(account, amount)| (account, *amount))
    }

    /// Number of accounts holding a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Sum of all balances, `None` if it does not fit in u128.
    pub fn sum_of_balances(&self) -> Option<u128> {
        self.balances
            .values()
            .try_fold(0u128, |acc, amount| acc.checked_add(amount.raw()))
    }

    /// Rebuild a book from raw parts. Used when restoring snapshots; the
    /// caller is responsible for checking conservation.
    pub(crate) fn from_parts(
        balances: impl IntoIterator<Item = (Account, TokenAmount)>,
        total_supply: TokenAmount,
    ) -> Self {
        let balances = balances
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .collect();
        Self {
            balances,
            total_supply,
        }
    }

    // Zero balances are dropped so `holders` only lists funded accounts.
    fn set_balance(&mut self, account: &Account, amount: TokenAmount) {
        if amount.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), amount);
        }
    }
}
