//! ProtoCoin ledger: a fungible-token state machine with an owner-controlled,
//! time-gated minting faucet.
//!
//! The ledger is split along its ownership boundaries:
//! - [`BalanceBook`]: balances and total supply, conservation of supply
//! - [`AllowanceBook`]: delegated spending approvals
//! - [`MintFaucet`]: mint amount, mint delay and per-account cooldowns
//! - [`AccessGuard`]: the owner predicate gating faucet configuration
//!
//! [`TokenLedger`] composes them into the operation surface callers use.
//! Every operation either commits all of its effects or returns an error and
//! leaves the state untouched.

pub mod allowance;
pub mod balances;
pub mod error;
pub mod faucet;
pub mod genesis;
pub mod guard;
pub mod snapshot;
pub mod token;

pub use allowance::AllowanceBook;
pub use balances::BalanceBook;
pub use error::LedgerError;
pub use faucet::{MintFaucet, MintStatus};
pub use genesis::GenesisConfig;
pub use guard::AccessGuard;
pub use snapshot::{AllowanceEntry, LedgerSnapshot, SNAPSHOT_VERSION};
pub use token::TokenLedger;
