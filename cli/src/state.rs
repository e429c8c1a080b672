//! Ledger persistence for the CLI: one snapshot file per ledger.

use std::path::Path;

use anyhow::{Context, Result};
use protocoin_ledger::{LedgerSnapshot, TokenLedger};
use protocoin_types::Timestamp;

/// Load and verify the ledger stored at `path`.
pub fn load(path: &Path) -> Result<TokenLedger> {
    let bytes = std::fs::read(path).with_context(|| {
        format!(
            "couldn't read ledger state {} (run `protocoin init` first)",
            path.display()
        )
    })?;
    let snapshot = LedgerSnapshot::from_bytes(&bytes)
        .with_context(|| format!("couldn't decode ledger state {}", path.display()))?;
    let ledger = TokenLedger::restore(snapshot)
        .with_context(|| format!("ledger state {} failed verification", path.display()))?;
    Ok(ledger)
}

/// Persist `ledger` to `path`, replacing any previous state.
///
/// Writes to a sibling temp file first and renames it over the target, so a
/// crash never leaves a half-written state file.
pub fn save(path: &Path, ledger: &TokenLedger, now: Timestamp) -> Result<()> {
    let bytes = ledger.snapshot(now).to_bytes();
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &bytes)
        .with_context(|| format!("couldn't write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("couldn't replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "ledger state saved");
    Ok(())
}
