#![no_main]

use libfuzzer_sys::fuzz_target;

use accrue_ledger::{Ledger, LedgerSnapshot};

// Decode arbitrary bytes as a snapshot. Anything that restores must pass
// the audit, since restoring runs it.
fuzz_target!(|data: &[u8]| {
    if let Ok(snap) = LedgerSnapshot::from_bytes(data) {
        let _ = snap.verify();
        if let Ok(ledger) = Ledger::from_snapshot(snap) {
            assert!(ledger.audit().is_ok());
        }
    }
});
