use std::fmt::Display;

use serde::Serialize;

use crate::{ErrorKind, Result};

/// Tokens starting with this prefix are account IDs, everything else is a name
pub const ACCOUNT_ID_PREFIX: &str = "account.";

/// Separator between tokens of a batch input string
pub const BATCH_DELIMITER: char = '|';

/// A single player to look up
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LookupRequest {
    /// Search by in-game player name
    ByName(String),
    /// Fetch by opaque account ID, e.g. `account.0123abcd`
    ById(String),
}

impl LookupRequest {
    /// Classify a token as a name or an account ID.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::EmptyInput`] if the token is empty.
    pub fn classify(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(ErrorKind::EmptyInput);
        }
        if token.starts_with(ACCOUNT_ID_PREFIX) {
            Ok(Self::ById(token.to_string()))
        } else {
            Ok(Self::ByName(token.to_string()))
        }
    }

    /// The token this request was created from
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::ByName(s) | Self::ById(s) => s,
        }
    }

    /// Returns `true` if this request looks up an account ID
    #[must_use]
    pub const fn is_by_id(&self) -> bool {
        matches!(self, Self::ById(_))
    }
}

impl Display for LookupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.input())
    }
}

impl TryFrom<&str> for LookupRequest {
    type Error = ErrorKind;

    fn try_from(token: &str) -> Result<Self> {
        Self::classify(token)
    }
}

impl TryFrom<String> for LookupRequest {
    type Error = ErrorKind;

    fn try_from(token: String) -> Result<Self> {
        Self::classify(&token)
    }
}

/// Split a batch input string into lookup requests.
///
/// Tokens are separated by `|` and trimmed. Empty tokens are dropped.
/// Order is preserved and duplicates are kept.
#[must_use]
pub fn parse_batch(input: &str) -> Vec<LookupRequest> {
    input
        .split(BATCH_DELIMITER)
        .map(str::trim)
        .filter_map(|token| LookupRequest::classify(token).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("account.12345", true)]
    #[case("account.", true)]
    #[case("Alice", false)]
    #[case("Account.12345", false)]
    #[case("my.account.name", false)]
    fn test_classify(#[case] token: &str, #[case] by_id: bool) {
        let request = LookupRequest::classify(token).unwrap();
        assert_eq!(request.is_by_id(), by_id);
        assert_eq!(request.input(), token);
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(LookupRequest::classify(""), Err(ErrorKind::EmptyInput));
    }

    #[test]
    fn test_parse_batch_drops_empty_tokens() {
        let requests = parse_batch("PlayerOne|account.12345|");
        assert_eq!(
            requests,
            vec![
                LookupRequest::ByName("PlayerOne".into()),
                LookupRequest::ById("account.12345".into()),
            ]
        );
    }

    #[test]
    fn test_parse_batch_trims_and_keeps_order() {
        let requests = parse_batch("  Alice | account.999 ||   | Bob|Alice");
        let inputs: Vec<&str> = requests.iter().map(LookupRequest::input).collect();
        assert_eq!(inputs, vec!["Alice", "account.999", "Bob", "Alice"]);
    }

    #[test]
    fn test_parse_batch_empty() {
        assert!(parse_batch("").is_empty());
        assert!(parse_batch(" | |").is_empty());
    }
}
