//! Errors raised while constructing validated primitive types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("memo is {len} bytes, at most {max} allowed")]
    MemoTooLong { len: usize, max: usize },

    #[error("account identity must not be empty")]
    EmptyAccountId,
}
