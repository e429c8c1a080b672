//! Ledger errors.

use protocoin_types::{Account, Timestamp, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance in {account}: need {needed}, available {available}")]
    InsufficientBalance {
        account: Account,
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("insufficient allowance from {owner} to {spender}: need {needed}, available {available}")]
    InsufficientAllowance {
        owner: Account,
        spender: Account,
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("{caller} is not the ledger owner")]
    Unauthorized { caller: Account },

    #[error("minting is not enabled")]
    MintingDisabled,

    #[error("mint cooldown active for {account} until {next_mint_at}")]
    MintCooldownActive {
        account: Account,
        next_mint_at: Timestamp,
    },

    #[error("arithmetic overflow in token supply")]
    Overflow,

    #[error("supply mismatch: total supply {supply}, sum of balances {sum}")]
    SupplyMismatch { supply: TokenAmount, sum: u128 },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
