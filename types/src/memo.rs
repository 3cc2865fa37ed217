//! Optional transfer memo.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Opaque bytes attached to a transfer and echoed in its event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Memo(Vec<u8>);

impl Memo {
    /// Maximum memo length in bytes.
    pub const MAX_LEN: usize = 34;

    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TypesError> {
        let bytes = bytes.into();
        if bytes.len() > Self::MAX_LEN {
            return Err(TypesError::MemoTooLong {
                len: bytes.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(text) => write!(f, "{text}"),
            Err(_) => write!(f, "{}", hex::encode(&self.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_memo_at_limit() {
        let memo = Memo::new(vec![7u8; Memo::MAX_LEN]).unwrap();
        assert_eq!(memo.len(), 34);
    }

    #[test]
    fn rejects_memo_over_limit() {
        let err = Memo::new(vec![0u8; 35]).unwrap_err();
        assert_eq!(err, TypesError::MemoTooLong { len: 35, max: 34 });
    }

    #[test]
    fn display_falls_back_to_hex_for_binary() {
        assert_eq!(Memo::new("invoice-42").unwrap().to_string(), "invoice-42");
        assert_eq!(Memo::new(vec![0xff, 0x00]).unwrap().to_string(), "ff00");
    }
}
