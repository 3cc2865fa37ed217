//! Account identity handle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// A stable account handle.
///
/// Caller authentication happens outside the ledger; by the time an
/// `AccountId` reaches an operation it is trusted. Accounts are created
/// lazily the first time an identity is referenced.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account handle from a raw identity string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Create an account handle, rejecting the empty identity.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypesError::EmptyAccountId);
        }
        Ok(Self(s))
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_identity() {
        assert_eq!(AccountId::parse(""), Err(TypesError::EmptyAccountId));
        assert_eq!(AccountId::parse("alice").unwrap().as_str(), "alice");
    }

    #[test]
    fn ordering_follows_identity_string() {
        let a = AccountId::from("alice");
        let b = AccountId::from("bob");
        assert!(a < b);
        assert_eq!(a.to_string(), "alice");
    }
}
