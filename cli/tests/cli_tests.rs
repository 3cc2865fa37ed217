use std::fs;

use accrue_cli::{run_inspect, run_replay, CliError, LedgerConfig};
use accrue_types::RewardEmission;

const SCENARIO: &str = r#"{
    "steps": [
        { "mint": { "to": "alice", "amount": 1000 } },
        { "mint": { "to": "bob", "amount": 1000 } },
        { "stake": { "caller": "alice", "amount": 100 } },
        { "stake": { "caller": "bob", "amount": 300 } },
        { "advance": { "blocks": 4 } },
        { "transfer": { "caller": "bob", "to": "carol", "amount": 50, "memo": "rent" } },
        { "claim": { "caller": "alice" } },
        { "unstake": { "caller": "bob", "amount": 300 } },
        { "claim": { "caller": "bob" } }
    ]
}"#;

#[test]
fn replay_writes_snapshot_that_inspects_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let scenario = dir.path().join("scenario.json");
    let snapshot = dir.path().join("ledger.snap");
    fs::write(&scenario, SCENARIO).unwrap();

    let report = run_replay(&LedgerConfig::default(), &scenario, Some(&snapshot)).unwrap();
    assert!(report.steps.iter().all(|s| s.ok));
    // 100 * 4 / 400 = 1 per token
    assert_eq!(report.steps[6].claimed, Some(100));
    assert_eq!(report.steps[8].claimed, Some(300));
    assert_eq!(report.final_state.total_supply, 2400);

    let summary = run_inspect(&snapshot).unwrap();
    assert_eq!(summary.snapshot_hash, report.snapshot_hash);
    assert_eq!(summary.total_supply, 2400);
    assert_eq!(summary.total_staked, 100);
    let ids: Vec<&str> = summary.accounts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["alice", "bob", "carol"]);
}

#[test]
fn config_file_drives_capped_emission() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("accrue.toml");
    fs::write(
        &config_path,
        "max_supply = 1000\nreward_emission = \"capped\"\n",
    )
    .unwrap();
    let config = LedgerConfig::from_toml_file(&config_path).unwrap();
    assert_eq!(config.reward_emission, RewardEmission::Capped);

    let scenario = dir.path().join("scenario.json");
    fs::write(
        &scenario,
        r#"{ "steps": [
            { "mint": { "to": "alice", "amount": 1000 } },
            { "stake": { "caller": "alice", "amount": 100 } },
            { "advance": { "blocks": 1 } },
            { "claim": { "caller": "alice" } }
        ] }"#,
    )
    .unwrap();

    let report = run_replay(&config, &scenario, None).unwrap();
    assert_eq!(report.steps[3].code, Some(103));
    assert_eq!(report.final_state.total_supply, 1000);
    assert_eq!(report.final_state.accounts[0].claimable, 100);
}

#[test]
fn corrupted_snapshot_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let scenario = dir.path().join("scenario.json");
    let snapshot = dir.path().join("ledger.snap");
    fs::write(&scenario, SCENARIO).unwrap();
    run_replay(&LedgerConfig::default(), &scenario, Some(&snapshot)).unwrap();

    let mut bytes = fs::read(&snapshot).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    fs::write(&snapshot, bytes).unwrap();

    assert!(matches!(run_inspect(&snapshot), Err(CliError::Ledger(_))));
}

#[test]
fn missing_scenario_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = run_replay(
        &LedgerConfig::default(),
        &dir.path().join("absent.json"),
        None,
    );
    assert!(matches!(result, Err(CliError::Io(_))));
}
