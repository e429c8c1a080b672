#![no_main]

use libfuzzer_sys::fuzz_target;

use protocoin_ledger::{LedgerSnapshot, TokenLedger};

// Decoding and restoring untrusted snapshot bytes must never panic, and any
// ledger that restores must satisfy conservation.
fuzz_target!(|data: &[u8]| {
    if let Ok(snapshot) = LedgerSnapshot::from_bytes(data) {
        if let Ok(ledger) = TokenLedger::restore(snapshot) {
            assert!(ledger.check_invariants().is_ok());
        }
    }
});
