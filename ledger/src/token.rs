//! The token ledger: the full operation surface over balances, allowances
//! and the mint faucet.

use protocoin_types::{Account, Timestamp, TokenAmount, TokenMetadata, INITIAL_SUPPLY};
use tracing::{debug, info};

use crate::allowance::AllowanceBook;
use crate::balances::BalanceBook;
use crate::error::LedgerError;
use crate::faucet::{MintFaucet, MintStatus};
use crate::genesis::GenesisConfig;
use crate::guard::AccessGuard;

/// A fungible-token ledger with an owner-controlled, time-gated faucet.
///
/// Operations run to completion one at a time (`&mut self`). Each either
/// commits all of its effects or fails with a [`LedgerError`] and leaves the
/// ledger exactly as it was. Time is never read internally: callers pass the
/// current time to the operations that depend on it.
#[derive(Clone, Debug)]
pub struct TokenLedger {
    pub(crate) metadata: TokenMetadata,
    pub(crate) guard: AccessGuard,
    pub(crate) balances: BalanceBook,
    pub(crate) allowances: AllowanceBook,
    pub(crate) faucet: MintFaucet,
}

impl TokenLedger {
    /// Create a ledger with the default ProtoCoin genesis, owned by `owner`.
    pub fn new(owner: Account) -> Self {
        let balances = BalanceBook::from_parts([(owner.clone(), INITIAL_SUPPLY)], INITIAL_SUPPLY);
        info!(%owner, supply = %INITIAL_SUPPLY, "ledger genesis");
        Self {
            metadata: TokenMetadata::default(),
            guard: AccessGuard::new(owner),
            balances,
            allowances: AllowanceBook::new(),
            faucet: MintFaucet::new(),
        }
    }

    /// Create a ledger from explicit genesis parameters.
    ///
    /// The whole initial supply is credited to `config.owner`.
    pub fn genesis(config: &GenesisConfig) -> Result<Self, LedgerError> {
        let mut balances = BalanceBook::new();
        balances.credit_new_supply(&config.owner, config.initial_supply)?;
        info!(
            owner = %config.owner,
            symbol = %config.metadata.symbol,
            supply = %config.initial_supply,
            mint_amount = %config.mint_amount,
            mint_delay_secs = config.mint_delay_secs,
            "ledger genesis"
        );
        Ok(Self {
            metadata: config.metadata.clone(),
            guard: AccessGuard::new(config.owner.clone()),
            balances,
            allowances: AllowanceBook::new(),
            faucet: MintFaucet::with_config(config.mint_amount, config.mint_delay_secs),
        })
    }

    // ── Metadata ───────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    // ── Balances ───────────────────────────────────────────────────────

    pub fn total_supply(&self) -> TokenAmount {
        self.balances.total_supply()
    }

    pub fn balance_of(&self, account: &Account) -> TokenAmount {
        self.balances.balance_of(account)
    }

    /// Move `amount` from `from` (the caller) to `to`.
    pub fn transfer(
        &mut self,
        from: &Account,
        to: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        self.balances
            .transfer(from, to, amount)
            .inspect_err(|e| debug!(%from, %to, %amount, error = %e, "transfer rejected"))?;
        debug!(%from, %to, %amount, "transfer");
        Ok(())
    }

    /// Accounts with a non-zero balance, in account order.
    pub fn holders(&self) -> impl Iterator<Item = (&Account, TokenAmount)> + '_ {
        self.balances.holders()
    }

    pub fn account_count(&self) -> usize {
        self.balances.holder_count()
    }

    // ── Allowances ─────────────────────────────────────────────────────

    /// Set the amount `spender` may move out of `owner`'s (the caller's) balance.
    pub fn approve(&mut self, owner: &Account, spender: &Account, amount: TokenAmount) {
        self.allowances.approve(owner, spender, amount);
        debug!(%owner, %spender, %amount, "approve");
    }

    pub fn allowance(&self, owner: &Account, spender: &Account) -> TokenAmount {
        self.allowances.allowance(owner, spender)
    }

    /// Move `amount` from `owner` to `to`, spending `spender`'s (the caller's) allowance.
    pub fn transfer_from(
        &mut self,
        spender: &Account,
        owner: &Account,
        to: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        self.allowances
            .transfer_from(&mut self.balances, spender, owner, to, amount)
            .inspect_err(|e| {
                debug!(%spender, %owner, %to, %amount, error = %e, "transfer_from rejected")
            })?;
        debug!(%spender, %owner, %to, %amount, "transfer_from");
        Ok(())
    }

    // ── Faucet ─────────────────────────────────────────────────────────

    pub fn owner(&self) -> &Account {
        self.guard.owner()
    }

    pub fn is_owner(&self, caller: &Account) -> bool {
        self.guard.is_owner(caller)
    }

    pub fn mint_amount(&self) -> TokenAmount {
        self.faucet.mint_amount()
    }

    pub fn mint_delay(&self) -> u64 {
        self.faucet.mint_delay()
    }

    pub fn last_mint_at(&self, account: &Account) -> Option<Timestamp> {
        self.faucet.last_mint_at(account)
    }

    pub fn next_mint_at(&self, account: &Account) -> Option<Timestamp> {
        self.faucet.next_mint_at(account)
    }

    pub fn mint_status(&self, account: &Account, now: Timestamp) -> MintStatus {
        self.faucet.status(account, now)
    }

    /// Issue the configured mint amount to `to`. Any caller may trigger it.
    ///
    /// Fails with `MintingDisabled` when the mint amount is zero,
    /// `MintCooldownActive` while `to` is cooling down, and `Overflow` if the
    /// new supply would not fit in a `u128`. State is unchanged on failure.
    pub fn mint(
        &mut self,
        caller: &Account,
        to: &Account,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        let minted = self
            .faucet
            .mint(&mut self.balances, to, now)
            .inspect_err(|e| debug!(%caller, %to, %now, error = %e, "mint rejected"))?;
        debug!(%caller, %to, %minted, %now, supply = %self.balances.total_supply(), "mint");
        Ok(minted)
    }

    pub fn set_mint_amount(
        &mut self,
        caller: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        self.faucet
            .set_mint_amount(&self.guard, caller, amount)
            .inspect_err(|e| debug!(%caller, %amount, error = %e, "set_mint_amount rejected"))?;
        debug!(%caller, %amount, "set_mint_amount");
        Ok(())
    }

    pub fn set_mint_delay(&mut self, caller: &Account, secs: u64) -> Result<(), LedgerError> {
        self.faucet
            .set_mint_delay(&self.guard, caller, secs)
            .inspect_err(|e| debug!(%caller, secs, error = %e, "set_mint_delay rejected"))?;
        debug!(%caller, secs, "set_mint_delay");
        Ok(())
    }

    // ── Audit ──────────────────────────────────────────────────────────

    /// Recompute the sum of all balances and compare it with the total supply.
    pub fn check_invariants(&self) -> Result<(), LedgerError> {
        let supply = self.balances.total_supply();
        let sum = self.balances.sum_of_balances().ok_or(LedgerError::Overflow)?;
        if sum != supply.raw() {
            return Err(LedgerError::SupplyMismatch { supply, sum });
        }
        Ok(())
    }
}
