//! Library half of the `accrue` binary: configuration, scenario replay and
//! JSON summaries, kept out of `main.rs` so they can be tested directly.

pub mod config;
pub mod error;
pub mod scenario;
pub mod summary;

pub use config::LedgerConfig;
pub use error::CliError;
pub use scenario::{replay, ReplayReport, Scenario, Step, StepOutcome};
pub use summary::{AccountSummary, LedgerSummary};

use std::path::Path;

use accrue_ledger::{Ledger, LedgerSnapshot};

/// Replay the scenario at `scenario_path` against a fresh ledger built from
/// `config`, optionally writing the final snapshot to `snapshot_out`.
pub fn run_replay(
    config: &LedgerConfig,
    scenario_path: &Path,
    snapshot_out: Option<&Path>,
) -> Result<ReplayReport, CliError> {
    let scenario = Scenario::from_json_file(scenario_path)?;
    let mut ledger = Ledger::new(config.admin_id()?, config.ledger_params());
    let mut report = replay(&mut ledger, &scenario)?;

    if let Some(path) = snapshot_out {
        let snap = ledger.snapshot()?;
        std::fs::write(path, snap.to_bytes()?)
            .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), hash = %snap.hash_hex(), "snapshot written");
        report.snapshot_hash = Some(snap.hash_hex());
    }
    Ok(report)
}

/// Decode, verify and summarize a snapshot file.
pub fn run_inspect(path: &Path) -> Result<LedgerSummary, CliError> {
    let bytes =
        std::fs::read(path).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    let snap = LedgerSnapshot::from_bytes(&bytes)?;
    let hash = snap.hash_hex();
    let ledger = Ledger::from_snapshot(snap)?;
    let height = ledger.last_update_time();
    Ok(LedgerSummary::from_ledger(&ledger, height).with_hash(hash))
}
