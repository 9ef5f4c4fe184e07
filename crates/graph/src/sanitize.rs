//! Repair of single-quoted `children` text into strict JSON.
//!
//! Source files quote structure with `'` and escape literal quotes inside
//! values as `\'`. Repair is attempted with an ordered ladder of
//! [`SanitizeStrategy`] rungs; the first rung that yields a list wins.

use crate::error::{DecodeError, StrategyError};
use crate::records::value_kind;
use serde_json::Value;

/// Private-use code point standing in for escaped quotes during the rewrite
const QUOTE_PLACEHOLDER: &str = "\u{E000}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeStrategy {
    /// `\'` survives as a literal quote, every other `'` becomes `"`
    EscapedQuotes,
    /// Every `'` becomes `"`, escapes ignored
    BlindQuotes,
}

impl SanitizeStrategy {
    pub const LADDER: [Self; 2] = [Self::EscapedQuotes, Self::BlindQuotes];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EscapedQuotes => "escaped_quotes",
            Self::BlindQuotes => "blind_quotes",
        }
    }

    #[must_use]
    pub fn rewrite(self, raw: &str) -> String {
        match self {
            Self::EscapedQuotes => raw
                .replace("\\'", QUOTE_PLACEHOLDER)
                .replace('\'', "\"")
                .replace(QUOTE_PLACEHOLDER, "'"),
            Self::BlindQuotes => raw.replace('\'', "\""),
        }
    }

    /// Rewrite and decode, requiring a JSON list
    pub fn decode(self, raw: &str) -> Result<Vec<Value>, StrategyError> {
        let value: Value =
            serde_json::from_str(&self.rewrite(raw)).map_err(|source| StrategyError::Json {
                strategy: self.as_str(),
                source,
            })?;
        match value {
            Value::Array(items) => Ok(items),
            other => Err(StrategyError::NotAList {
                strategy: self.as_str(),
                found: value_kind(&other),
            }),
        }
    }
}

/// Decode quasi-structured text with the full strategy ladder
pub fn decode_quasi_json(raw: &str) -> Result<Vec<Value>, DecodeError> {
    let mut attempts = Vec::new();
    for strategy in SanitizeStrategy::LADDER {
        match strategy.decode(raw) {
            Ok(items) => {
                if !attempts.is_empty() {
                    log::debug!(
                        "Children text decoded with fallback strategy {}",
                        strategy.as_str()
                    );
                }
                return Ok(items);
            }
            Err(err) => attempts.push(err),
        }
    }
    Err(DecodeError { attempts })
}
