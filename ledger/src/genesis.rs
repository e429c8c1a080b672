//! Genesis configuration: the parameters a ledger is created with.

use protocoin_types::{Account, TokenAmount, TokenMetadata, INITIAL_SUPPLY};
use serde::{Deserialize, Serialize};

/// Parameters fixed when a ledger is created.
///
/// Only `owner` is required when deserializing; everything else defaults to
/// the ProtoCoin genesis: 10,000,000 PRC to the owner, minting disabled, no
/// cooldown. Amounts are raw units and may be written as integers or decimal
/// strings, since TOML integers cannot hold the full u128 range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// The account that receives the initial supply and configures the faucet.
    pub owner: Account,

    #[serde(default = "default_initial_supply", with = "amount_serde")]
    pub initial_supply: TokenAmount,

    #[serde(default, with = "amount_serde")]
    pub mint_amount: TokenAmount,

    #[serde(default)]
    pub mint_delay_secs: u64,

    #[serde(default)]
    pub metadata: TokenMetadata,
}

fn default_initial_supply() -> TokenAmount {
    INITIAL_SUPPLY
}

impl GenesisConfig {
    /// The default genesis for `owner`.
    pub fn new(owner: Account) -> Self {
        Self {
            owner,
            metadata: TokenMetadata::default(),
            initial_supply: default_initial_supply(),
            mint_amount: TokenAmount::ZERO,
            mint_delay_secs: 0,
        }
    }
}

/// Serialize amounts as decimal strings; accept either strings or integers.
mod amount_serde {
    use protocoin_types::TokenAmount;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Int(u64),
        Str(String),
    }

    pub fn serialize<S: Serializer>(amount: &TokenAmount, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&amount.raw().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TokenAmount, D::Error> {
        match RawAmount::deserialize(d)? {
            RawAmount::Int(v) => Ok(TokenAmount::new(u128::from(v))),
            RawAmount::Str(s) => s
                .trim()
                .replace('_', "")
                .parse::<u128>()
                .map(TokenAmount::new)
                .map_err(|e| de::Error::custom(format!("invalid amount {s:?}: {e}"))),
        }
    }
}
