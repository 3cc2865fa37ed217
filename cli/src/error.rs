use accrue_ledger::LedgerError;
use accrue_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("io error: {0}")]
    Io(String),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
