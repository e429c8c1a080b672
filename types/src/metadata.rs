//! Token metadata fixed at genesis.

use serde::{Deserialize, Serialize};

use crate::amount::DECIMALS;

/// Human-facing token description: name, ticker symbol, and decimal places.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_name() -> String {
    "ProtoCoin".to_string()
}

fn default_symbol() -> String {
    "PRC".to_string()
}

fn default_decimals() -> u8 {
    DECIMALS
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
        }
    }
}
