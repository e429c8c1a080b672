//! Ledger snapshots: capture the complete ledger state at a point in time.
//!
//! A snapshot carries everything needed to rebuild a [`TokenLedger`]: metadata,
//! owner, supply, every balance, every allowance, the faucet configuration and
//! every cooldown timestamp. Its hash is computed deterministically from that
//! state so a stored snapshot can be checked for tampering before it is loaded.

use serde::{Deserialize, Serialize};

use protocoin_types::{Account, Timestamp, TokenAmount, TokenMetadata};

use crate::allowance::AllowanceBook;
use crate::balances::BalanceBook;
use crate::error::LedgerError;
use crate::faucet::MintFaucet;
use crate::guard::AccessGuard;
use crate::token::TokenLedger;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One `(owner, spender)` allowance captured in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    pub owner: Account,
    pub spender: Account,
    pub amount: TokenAmount,
}

/// A complete, self-verifying copy of ledger state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of the ledger state fields (excludes `created_at`).
    pub hash: [u8; 32],
    /// Snapshot version for compatibility.
    pub version: u32,
    /// When the snapshot was taken.
    pub created_at: Timestamp,
    pub metadata: TokenMetadata,
    pub owner: Account,
    pub total_supply: TokenAmount,
    pub mint_amount: TokenAmount,
    pub mint_delay_secs: u64,
    /// Non-zero balances in account order.
    pub balances: Vec<(Account, TokenAmount)>,
    /// Non-zero allowances ordered by owner, then spender.
    pub allowances: Vec<AllowanceEntry>,
    /// Last successful mint per account, in account order.
    pub last_mints: Vec<(Account, Timestamp)>,
}

impl LedgerSnapshot {
    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        fn put_str(hasher: &mut Blake2b<U32>, s: &str) {
            hasher.update((s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        put_str(&mut hasher, &self.metadata.name);
        put_str(&mut hasher, &self.metadata.symbol);
        hasher.update([self.metadata.decimals]);
        put_str(&mut hasher, self.owner.as_str());
        hasher.update(self.total_supply.raw().to_le_bytes());
        hasher.update(self.mint_amount.raw().to_le_bytes());
        hasher.update(self.mint_delay_secs.to_le_bytes());

        hasher.update((self.balances.len() as u64).to_le_bytes());
        for (account, amount) in &self.balances {
            put_str(&mut hasher, account.as_str());
            hasher.update(amount.raw().to_le_bytes());
        }
        hasher.update((self.allowances.len() as u64).to_le_bytes());
        for entry in &self.allowances {
            put_str(&mut hasher, entry.owner.as_str());
            put_str(&mut hasher, entry.spender.as_str());
            hasher.update(entry.amount.raw().to_le_bytes());
        }
        hasher.update((self.last_mints.len() as u64).to_le_bytes());
        for (account, at) in &self.last_mints {
            put_str(&mut hasher, account.as_str());
            hasher.update(at.as_secs().to_le_bytes());
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the state data.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes. The hash is not checked here; see
    /// [`TokenLedger::restore`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::InvalidSnapshot(e.to_string()))
    }

    /// Number of funded accounts in this snapshot.
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}

impl TokenLedger {
    /// Capture the full ledger state.
    pub fn snapshot(&self, now: Timestamp) -> LedgerSnapshot {
        let mut snap = LedgerSnapshot {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            created_at: now,
            metadata: self.metadata.clone(),
            owner: self.guard.owner().clone(),
            total_supply: self.balances.total_supply(),
            mint_amount: self.faucet.mint_amount(),
            mint_delay_secs: self.faucet.mint_delay(),
            balances: self
                .balances
                .holders()
                .map(|(account, amount)| (account.clone(), amount))
                .collect(),
            allowances: self
                .allowances
                .entries()
                .map(|(owner, spender, amount)| AllowanceEntry {
                    owner: owner.clone(),
                    spender: spender.clone(),
                    amount,
                })
                .collect(),
            last_mints: self
                .faucet
                .cooldowns()
                .map(|(account, at)| (account.clone(), at))
                .collect(),
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// Rejects snapshots with an unknown version, a hash that does not match
    /// their contents, or balances that do not sum to the total supply.
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(LedgerError::InvalidSnapshot(format!(
                "unsupported version {}",
                snapshot.version
            )));
        }
        if !snapshot.verify() {
            return Err(LedgerError::InvalidSnapshot("hash mismatch".into()));
        }

        let ledger = Self {
            metadata: snapshot.metadata,
            guard: AccessGuard::new(snapshot.owner),
            balances: BalanceBook::from_parts(snapshot.balances, snapshot.total_supply),
            allowances: AllowanceBook::from_entries(
                snapshot
                    .allowances
                    .into_iter()
                    .map(|e| (e.owner, e.spender, e.amount)),
            ),
            faucet: MintFaucet::from_parts(
                snapshot.mint_amount,
                snapshot.mint_delay_secs,
                snapshot.last_mints,
            ),
        };
        ledger
            .check_invariants()
            .map_err(|e| LedgerError::InvalidSnapshot(e.to_string()))?;
        tracing::info!(
            owner = %ledger.owner(),
            supply = %ledger.total_supply(),
            accounts = ledger.account_count(),
            "ledger restored from snapshot"
        );
        Ok(ledger)
    }
}
