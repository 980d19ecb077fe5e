//! Hacker tag payload format.
//!
//! Every printed or displayed participant QR code encodes an ASCII string of
//! the form `hack:<identifier>`. The `hack:` prefix is a fixed contract
//! between whatever issues the codes and this reader — anything else is a
//! format error and never reaches the dispatch step.

use std::fmt;

/// Literal prefix every valid decoded payload must carry.
pub const TAG_PREFIX: &str = "hack:";

/// A validated hacker tag: the participant identifier extracted from a
/// decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HackerTag {
    identifier: String,
}

impl HackerTag {
    /// Parses a decoded payload, returning `None` unless it starts with
    /// the literal [`TAG_PREFIX`].
    #[must_use]
    pub fn parse(payload: &str) -> Option<Self> {
        payload.strip_prefix(TAG_PREFIX).map(|id| Self {
            identifier: id.to_string(),
        })
    }

    /// Returns the embedded participant identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for HackerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TAG_PREFIX}{}", self.identifier)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_identifier() {
        let Some(tag) = HackerTag::parse("hack:u123") else {
            panic!("expected valid tag");
        };
        assert_eq!(tag.identifier(), "u123");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert_eq!(HackerTag::parse("garbage"), None);
        assert_eq!(HackerTag::parse("u123"), None);
        assert_eq!(HackerTag::parse(""), None);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(HackerTag::parse("HACK:u123"), None);
    }

    #[test]
    fn display_round_trips() {
        let Some(tag) = HackerTag::parse("hack:abc-42") else {
            panic!("expected valid tag");
        };
        assert_eq!(tag.to_string(), "hack:abc-42");
    }
}
