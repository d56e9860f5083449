use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Value does not fit in a 32-byte word: {0}")]
    TooLong(String),
}

/// Encode an identifier-like string as the protocol's canonical fixed-word form:
/// UTF-8 bytes right-padded with zeros into a 32-byte word
pub fn encode_word(s: &str) -> Result<B256, CurrencyError> {
    let bytes = s.as_bytes();
    if bytes.len() > 32 {
        return Err(CurrencyError::TooLong(s.to_string()));
    }

    let mut word = [0u8; 32];
    word[..bytes.len()].copy_from_slice(bytes);
    Ok(B256::from(word))
}

/// Decode a fixed word back into its string form, trimming the zero padding.
/// Returns `None` if the payload is not valid UTF-8
pub fn decode_word(word: &B256) -> Option<String> {
    let end = word
        .as_slice()
        .iter()
        .rposition(|b| *b != 0)
        .map(|idx| idx + 1)
        .unwrap_or(0);

    std::str::from_utf8(&word.as_slice()[..end])
        .ok()
        .map(|s| s.to_string())
}

/// A currency key, e.g. `mUSD` - stored as its string form, encoded as a
/// fixed word when passed on-chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyKey(String);

impl CurrencyKey {
    pub fn new(key: impl ToString) -> Self {
        Self(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn word(&self) -> Result<B256, CurrencyError> {
        encode_word(&self.0)
    }
}

impl FromStr for CurrencyKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl std::fmt::Display for CurrencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
