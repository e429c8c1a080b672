//! Mint faucet: owner-configured, per-account rate-limited issuance.
//!
//! Each account is either eligible to receive a mint or cooling down. An
//! account with no recorded mint is eligible. After a mint at time `T` it is
//! cooling until `T + mint_delay`, at which point it becomes eligible again.
//! Expiry is evaluated lazily from the caller-supplied time on each query;
//! there is no timer.

use std::collections::BTreeMap;

use protocoin_types::{Account, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::balances::BalanceBook;
use crate::error::LedgerError;
use crate::guard::AccessGuard;

/// Where an account stands with respect to the faucet at a given time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintStatus {
    /// Mint amount is zero; nobody can mint.
    Disabled,
    /// A mint to this account would succeed.
    Eligible,
    /// A mint to this account would fail until `remaining_secs` have passed.
    Cooling { remaining_secs: u64 },
}

/// Faucet configuration and per-account cooldown state.
#[derive(Clone, Debug, Default)]
pub struct MintFaucet {
    mint_amount: TokenAmount,
    mint_delay_secs: u64,
    last_mint: BTreeMap<Account, Timestamp>,
}

impl MintFaucet {
    /// A faucet with minting disabled and no cooldown.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mint_amount: TokenAmount, mint_delay_secs: u64) -> Self {
        Self {
            mint_amount,
            mint_delay_secs,
            last_mint: BTreeMap::new(),
        }
    }

    pub fn mint_amount(&self) -> TokenAmount {
        self.mint_amount
    }

    pub fn mint_delay(&self) -> u64 {
        self.mint_delay_secs
    }

    pub fn last_mint_at(&self, account: &Account) -> Option<Timestamp> {
        self.last_mint.get(account).copied()
    }

    /// Earliest time `account` may receive its next mint, `None` if it never received one.
    pub fn next_mint_at(&self, account: &Account) -> Option<Timestamp> {
        self.last_mint_at(account)
            .map(|last| last.saturating_add(self.mint_delay_secs))
    }

    /// Set the amount credited per mint. Owner only.
    pub fn set_mint_amount(
        &mut self,
        guard: &AccessGuard,
        caller: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        if !guard.is_owner(caller) {
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }
        self.mint_amount = amount;
        Ok(())
    }

    /// Set the minimum seconds between two mints to the same account. Owner only.
    pub fn set_mint_delay(
        &mut self,
        guard: &AccessGuard,
        caller: &Account,
        secs: u64,
    ) -> Result<(), LedgerError> {
        if !guard.is_owner(caller) {
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }
        self.mint_delay_secs = secs;
        Ok(())
    }

    /// Evaluate the faucet state of `account` at `now` without mutating anything.
    pub fn status(&self, account: &Account, now: Timestamp) -> MintStatus {
        if self.mint_amount.is_zero() {
            return MintStatus::Disabled;
        }
        if self.mint_delay_secs == 0 {
            return MintStatus::Eligible;
        }
        match self.last_mint_at(account) {
            None => MintStatus::Eligible,
            Some(last) if last.has_expired(self.mint_delay_secs, now) => MintStatus::Eligible,
            Some(last) => MintStatus::Cooling {
                remaining_secs: self.mint_delay_secs - last.elapsed_since(now),
            },
        }
    }

    /// Credit the configured mint amount to `to` and start its cooldown.
    ///
    /// Checks, in order: minting enabled, `to` not cooling, supply does not
    /// overflow. Balance, supply and cooldown timestamp change together.
    pub fn mint(
        &mut self,
        balances: &mut BalanceBook,
        to: &Account,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        match self.status(to, now) {
            MintStatus::Disabled => return Err(LedgerError::MintingDisabled),
            MintStatus::Cooling { .. } => {
                return Err(LedgerError::MintCooldownActive {
                    account: to.clone(),
                    next_mint_at: self.next_mint_at(to).unwrap_or(now),
                });
            }
            MintStatus::Eligible => {}
        }
        balances.credit_new_supply(to, self.mint_amount)?;
        self.last_mint.insert(to.clone(), now);
        Ok(self.mint_amount)
    }

    /// Recorded last-mint timestamps, in account order.
    pub fn cooldowns(&self) -> impl Iterator<Item = (&Account, Timestamp)> + '_ {
        self.last_mint.iter().map(|(account, at)| (account, *at))
    }

    pub(crate) fn from_parts(
        mint_amount: TokenAmount,
        mint_delay_secs: u64,
        last_mint: impl IntoIterator<Item = (Account, Timestamp)>,
    ) -> Self {
        Self {
            mint_amount,
            mint_delay_secs,
            last_mint: last_mint.into_iter().collect(),
        }
    }
}
