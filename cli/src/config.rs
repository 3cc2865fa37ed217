//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use accrue_types::params::{DEFAULT_MAX_SUPPLY, DEFAULT_REWARD_RATE};
use accrue_types::{AccountId, LedgerParams, RewardEmission, TokenMetadata, ZeroStakeAccrual};
use accrue_utils::LogFormat;

use crate::CliError;

/// Configuration for a ledger run.
///
/// TOML integers are 64-bit signed, so the amount knobs also accept a
/// decimal string covering the full `u128` range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Identity allowed to mint, pause and set the reward rate.
    #[serde(default = "default_admin")]
    pub admin: String,

    /// Cap on admin minting.
    #[serde(default = "default_max_supply", with = "decimal_u128")]
    pub max_supply: u128,

    /// Reward units per block at genesis.
    #[serde(default = "default_reward_rate", with = "decimal_u128")]
    pub reward_rate: u128,

    #[serde(default)]
    pub zero_stake_accrual: ZeroStakeAccrual,

    #[serde(default)]
    pub reward_emission: RewardEmission,

    #[serde(default)]
    pub metadata: TokenMetadata,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_admin() -> String {
    "admin".to_string()
}

fn default_max_supply() -> u128 {
    DEFAULT_MAX_SUPPLY
}

fn default_reward_rate() -> u128 {
    DEFAULT_REWARD_RATE
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `u128` as a non-negative integer or a decimal string. Written back as a
/// string so values above `i64::MAX` survive a TOML round trip.
mod decimal_u128 {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(u128::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn admin_id(&self) -> Result<AccountId, CliError> {
        Ok(AccountId::parse(self.admin.clone())?)
    }

    /// Parameters for a fresh ledger.
    pub fn ledger_params(&self) -> LedgerParams {
        LedgerParams {
            max_supply: self.max_supply,
            initial_reward_rate: self.reward_rate,
            zero_stake_accrual: self.zero_stake_accrual,
            reward_emission: self.reward_emission,
            metadata: self.metadata.clone(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            max_supply: default_max_supply(),
            reward_rate: default_reward_rate(),
            zero_stake_accrual: ZeroStakeAccrual::default(),
            reward_emission: RewardEmission::default(),
            metadata: TokenMetadata::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.ledger_params(), LedgerParams::default());
    }

    #[test]
    fn parses_policies_and_metadata() {
        let config = LedgerConfig::from_toml_str(
            r#"
            admin = "treasury"
            max_supply = 5000
            reward_rate = 7
            zero_stake_accrual = "skip"
            reward_emission = "capped"
            log_format = "json"

            [metadata]
            name = "Test Token"
            symbol = "TST"
            decimals = 2
            "#,
        )
        .unwrap();

        let params = config.ledger_params();
        assert_eq!(params.max_supply, 5000);
        assert_eq!(params.initial_reward_rate, 7);
        assert_eq!(params.zero_stake_accrual, ZeroStakeAccrual::Skip);
        assert_eq!(params.reward_emission, RewardEmission::Capped);
        assert_eq!(params.metadata.symbol, "TST");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.admin_id().unwrap(), AccountId::from("treasury"));
    }

    #[test]
    fn amounts_accept_full_u128_as_strings() {
        let config = LedgerConfig::from_toml_str(&format!(
            "max_supply = \"{}\"\nreward_rate = \"18446744073709551616\"\n",
            u128::MAX
        ))
        .unwrap();
        assert_eq!(config.ledger_params().max_supply, u128::MAX);
        assert_eq!(config.reward_rate, u128::from(u64::MAX) + 1);

        let written = toml::to_string(&config).unwrap();
        assert_eq!(LedgerConfig::from_toml_str(&written).unwrap(), config);
    }

    #[test]
    fn negative_or_malformed_amounts_rejected() {
        for bad in ["max_supply = -1", r#"reward_rate = "lots""#, "max_supply = 1.5"] {
            let result = LedgerConfig::from_toml_str(bad);
            assert!(matches!(result, Err(CliError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn unknown_policy_rejected() {
        let result = LedgerConfig::from_toml_str(r#"reward_emission = "sometimes""#);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn empty_admin_rejected() {
        let config = LedgerConfig {
            admin: String::new(),
            ..LedgerConfig::default()
        };
        assert!(matches!(config.admin_id(), Err(CliError::Types(_))));
    }
}
