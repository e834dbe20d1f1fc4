use crate::error::TabIdError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Number of leading lowercase letters in a canonical tab id.
pub const TAB_ID_LETTERS: usize = 2;
/// Number of trailing digits in a canonical tab id.
pub const TAB_ID_DIGITS: usize = 4;

/// An opaque per-tab token such as `ab-1234`.
///
/// Freshly generated ids always have the canonical `[a-z]{2}-[0-9]{4}` shape, but
/// ids read back from storage or a URL are carried as-is: anything else could
/// have written them. Use [`TabId::is_well_formed`] to check the shape, or parse
/// with [`str::parse`] to reject non-canonical input.
///
/// The id is not a security token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns true if the id matches `[a-z]{2}-[0-9]{4}`.
    pub fn is_well_formed(&self) -> bool {
        is_well_formed(&self.0)
    }
}

fn is_well_formed(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != TAB_ID_LETTERS + 1 + TAB_ID_DIGITS {
        return false;
    }
    let (letters, rest) = bytes.split_at(TAB_ID_LETTERS);
    let (hyphen, digits) = rest.split_at(1);

    letters.iter().all(u8::is_ascii_lowercase)
        && hyphen == b"-"
        && digits.iter().all(u8::is_ascii_digit)
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for TabId {
    type Err = TabIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(TabIdError::InvalidTabId(s.to_string()))
        }
    }
}

impl AsRef<str> for TabId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TabId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TabId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_are_well_formed() {
        assert!(TabId::from("ab-1234").is_well_formed());
        assert!(TabId::from("zz-0000").is_well_formed());
    }

    #[test]
    fn rejects_non_canonical_shapes() {
        for value in ["", "AB-1234", "ab1234", "ab-123", "abc-1234", "ab-12345", "ab_1234", "a1-1234"] {
            assert!(!TabId::from(value).is_well_formed(), "{value} should be rejected");
            assert!(value.parse::<TabId>().is_err());
        }
    }

    #[test]
    fn parse_keeps_value() {
        let id: TabId = "xy-9999".parse().unwrap();
        assert_eq!(id, "xy-9999");
        assert_eq!(id.to_string(), "xy-9999");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TabId::from("ab-1234");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ab-1234\"");
        let back: TabId = serde_json::from_str("\"ab-1234\"").unwrap();
        assert_eq!(back, id);
    }
}
