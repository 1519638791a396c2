//! Identifier types used to join the feeds.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when parsing an empty or blank identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what}: {reason}")]
pub struct InvalidId {
    what: &'static str,
    reason: &'static str,
}

/// A station short name (`Kurzname`), the canonical cross-feed join key.
///
/// Short names are compared exactly: no case folding, no trimming beyond
/// what `parse` rejects. The feeds are assumed to be consistently cased.
///
/// # Examples
///
/// ```
/// use disorder_map::domain::ShortName;
///
/// let neumarkt = ShortName::parse("NM").unwrap();
/// assert_eq!(neumarkt.as_str(), "NM");
///
/// // Case matters
/// assert_ne!(neumarkt, ShortName::parse("nm").unwrap());
///
/// // Blank names are rejected
/// assert!(ShortName::parse("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShortName(String);

impl ShortName {
    /// Parse a short name. The input must contain a non-whitespace character.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        if s.trim().is_empty() {
            return Err(InvalidId {
                what: "short name",
                reason: "must not be blank",
            });
        }
        Ok(ShortName(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortName({})", self.0)
    }
}

impl fmt::Display for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stop area code (`Haltestellenbereich`).
///
/// Several platforms and facilities belong to one area. The upstream feeds
/// encode it as a JSON number in some collections and as a string in
/// others, so deserialization accepts both and stores the decimal text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AreaCode(String);

impl AreaCode {
    /// Parse an area code from its text form.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidId {
                what: "area code",
                reason: "must not be blank",
            });
        }
        Ok(AreaCode(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AreaCode({})", self.0)
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AreaCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => whole_number_text(&n).ok_or_else(|| {
                serde::de::Error::custom(format!("area code must be a whole number, got {n}"))
            })?,
            Raw::Text(s) => s,
        };
        AreaCode::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Integer text of a JSON number; `12.0` gives `"12"`, `12.5` gives `None`.
fn whole_number_text(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    // beyond 2^53 a float no longer holds every integer exactly
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0)
        .map(|f| (f as i64).to_string())
}

impl<'de> Deserialize<'de> for ShortName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ShortName::parse(&s).map_err(serde::de::Error::custom)
    }
}
