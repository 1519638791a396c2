//! Operating mode (`Betriebsbereich`) of a stop.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The operating area a stop belongs to.
///
/// Only `STRAB` (light rail / tram) stops appear on the station map. Tags
/// the map does not know about are kept verbatim so they survive a
/// roundtrip through the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperatingMode {
    /// Stadtbahn: rail-mode stop.
    Strab,
    /// Bus-only stop.
    Bus,
    /// Any other tag, e.g. mixed `"BUS STRAB"`.
    Other(String),
}

impl OperatingMode {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "STRAB" => OperatingMode::Strab,
            "BUS" => OperatingMode::Bus,
            other => OperatingMode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OperatingMode::Strab => "STRAB",
            OperatingMode::Bus => "BUS",
            OperatingMode::Other(s) => s,
        }
    }

    /// Whether stops in this mode are shown as stations.
    pub fn is_rail(&self) -> bool {
        matches!(self, OperatingMode::Strab)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OperatingMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OperatingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(OperatingMode::parse(&s))
    }
}
