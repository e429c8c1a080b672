//! Fundamental types for the ProtoCoin ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identities, token amounts, timestamps, and token metadata.

pub mod account;
pub mod amount;
pub mod metadata;
pub mod time;

pub use account::Account;
pub use amount::{TokenAmount, DECIMALS, GENESIS_SUPPLY_TOKENS, INITIAL_SUPPLY, ONE_TOKEN};
pub use metadata::TokenMetadata;
pub use time::Timestamp;
