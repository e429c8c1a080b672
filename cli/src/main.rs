//! `protocoin`: command-line driver for a persisted ProtoCoin ledger.
//!
//! Each invocation loads the ledger snapshot, applies one operation and, if
//! the operation succeeded, writes the new state back.

mod config;
mod state;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use protocoin_ledger::{GenesisConfig, MintStatus, TokenLedger};
use protocoin_types::{Account, Timestamp, TokenAmount, TokenMetadata};
use protocoin_utils::{format_duration, init_logging, init_tracing, LogFormat};
use serde::Serialize;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "protocoin", about = "ProtoCoin ledger with an owner-controlled mint faucet")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "PROTOCOIN_CONFIG")]
    config: Option<PathBuf>,

    /// Ledger state file.
    #[arg(long, env = "PROTOCOIN_STATE")]
    state: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PROTOCOIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "PROTOCOIN_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a new ledger, crediting the initial supply to the owner.
    Init {
        /// Owner account (overrides `genesis.owner` from the config file).
        #[arg(long)]
        owner: Option<String>,
        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Print token metadata, supply and faucet configuration as JSON.
    Info,
    /// Print the balance of an account.
    Balance { account: String },
    /// Print how much `spender` may still move out of `owner`'s balance.
    Allowance { owner: String, spender: String },
    /// Transfer raw units from one account to another.
    Transfer {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        amount: u128,
    },
    /// Set the allowance of `spender` over `owner`'s balance.
    Approve {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        spender: String,
        amount: u128,
    },
    /// Spend an allowance: move raw units from `owner` to `to` as `spender`.
    TransferFrom {
        #[arg(long)]
        spender: String,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        to: String,
        amount: u128,
    },
    /// Issue the configured mint amount to an account.
    Mint {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        to: String,
        /// Unix time in seconds to mint at (defaults to now).
        #[arg(long)]
        at: Option<u64>,
    },
    /// Set the amount issued per mint (owner only; 0 disables minting).
    SetMintAmount {
        #[arg(long)]
        caller: String,
        amount: u128,
    },
    /// Set the minimum seconds between two mints to the same account (owner only).
    SetMintDelay {
        #[arg(long)]
        caller: String,
        secs: u64,
    },
    /// Show whether an account can receive a mint.
    MintStatus {
        account: String,
        /// Unix time in seconds to evaluate at (defaults to now).
        #[arg(long)]
        at: Option<u64>,
    },
}

/// JSON shape of `protocoin info`.
#[derive(Serialize)]
struct TokenInfo<'a> {
    #[serde(flatten)]
    metadata: &'a TokenMetadata,
    owner: &'a Account,
    total_supply: String,
    mint_amount: String,
    mint_delay_secs: u64,
    accounts: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };

    if cli.config.is_none() && cli.log_format.is_none() && cli.log_level.is_none() {
        init_tracing();
    } else {
        let log_format = match cli.log_format {
            Some(format) => format,
            None => file_config
                .log_format
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)?,
        };
        let log_level = cli.log_level.unwrap_or_else(|| file_config.log_level.clone());
        init_logging(log_format, &log_level);
    }

    let state_path = cli.state.unwrap_or_else(|| file_config.state_path.clone());
    if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    run(cli.command, &file_config, &state_path)
}

fn at_or_now(at: Option<u64>) -> Timestamp {
    at.map(Timestamp::new).unwrap_or_else(Timestamp::now)
}

fn run(command: Command, config: &CliConfig, state_path: &Path) -> Result<()> {
    match command {
        Command::Init { owner, force } => {
            if state_path.exists() && !force {
                bail!(
                    "ledger state {} already exists (use --force to overwrite)",
                    state_path.display()
                );
            }
            let genesis = match (owner, config.genesis.clone()) {
                (Some(owner), Some(mut genesis)) => {
                    genesis.owner = Account::new(owner);
                    genesis
                }
                (Some(owner), None) => GenesisConfig::new(Account::new(owner)),
                (None, Some(genesis)) => genesis,
                (None, None) => {
                    bail!("no owner given: pass --owner or set genesis.owner in the config file")
                }
            };
            let ledger = TokenLedger::genesis(&genesis).context("genesis failed")?;
            state::save(state_path, &ledger, Timestamp::now())?;
            println!(
                "initialized {} ({}) with {} raw units owned by {}",
                ledger.name(),
                ledger.symbol(),
                ledger.total_supply(),
                ledger.owner()
            );
        }
        Command::Info => {
            let ledger = state::load(state_path)?;
            let info = TokenInfo {
                metadata: ledger.metadata(),
                owner: ledger.owner(),
                total_supply: ledger.total_supply().to_string(),
                mint_amount: ledger.mint_amount().to_string(),
                mint_delay_secs: ledger.mint_delay(),
                accounts: ledger.account_count(),
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Balance { account } => {
            let ledger = state::load(state_path)?;
            println!("{}", ledger.balance_of(&Account::new(account)));
        }
        Command::Allowance { owner, spender } => {
            let ledger = state::load(state_path)?;
            println!(
                "{}",
                ledger.allowance(&Account::new(owner), &Account::new(spender))
            );
        }
        Command::Transfer { from, to, amount } => {
            let mut ledger = state::load(state_path)?;
            ledger.transfer(&Account::new(from), &Account::new(to), TokenAmount::new(amount))?;
            state::save(state_path, &ledger, Timestamp::now())?;
        }
        Command::Approve {
            owner,
            spender,
            amount,
        } => {
            let mut ledger = state::load(state_path)?;
            ledger.approve(
                &Account::new(owner),
                &Account::new(spender),
                TokenAmount::new(amount),
            );
            state::save(state_path, &ledger, Timestamp::now())?;
        }
        Command::TransferFrom {
            spender,
            owner,
            to,
            amount,
        } => {
            let mut ledger = state::load(state_path)?;
            ledger.transfer_from(
                &Account::new(spender),
                &Account::new(owner),
                &Account::new(to),
                TokenAmount::new(amount),
            )?;
            state::save(state_path, &ledger, Timestamp::now())?;
        }
        Command::Mint { caller, to, at } => {
            let mut ledger = state::load(state_path)?;
            let now = at_or_now(at);
            let to = Account::new(to);
            let minted = ledger.mint(&Account::new(caller), &to, now)?;
            state::save(state_path, &ledger, now)?;
            println!("minted {minted} to {to}");
        }
        Command::SetMintAmount { caller, amount } => {
            let mut ledger = state::load(state_path)?;
            ledger.set_mint_amount(&Account::new(caller), TokenAmount::new(amount))?;
            state::save(state_path, &ledger, Timestamp::now())?;
        }
        Command::SetMintDelay { caller, secs } => {
            let mut ledger = state::load(state_path)?;
            ledger.set_mint_delay(&Account::new(caller), secs)?;
            state::save(state_path, &ledger, Timestamp::now())?;
        }
        Command::MintStatus { account, at } => {
            let ledger = state::load(state_path)?;
            match ledger.mint_status(&Account::new(account), at_or_now(at)) {
                MintStatus::Disabled => println!("disabled"),
                MintStatus::Eligible => println!("eligible"),
                MintStatus::Cooling { remaining_secs } => {
                    println!("cooling ({} remaining)", format_duration(remaining_secs))
                }
            }
        }
    }
    Ok(())
}
