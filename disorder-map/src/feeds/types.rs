//! Raw GeoJSON types as published by the open data service.
//!
//! Feature properties are kept as untyped JSON here; they are validated one
//! feature at a time in `convert` so a single bad feature does not discard
//! the whole collection.

use serde::{Deserialize, Deserializer};

use crate::domain::{AreaCode, OperatingMode, ShortName};

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A GeoJSON `Feature` with loosely typed contents.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// A GeoJSON geometry. Only `Point` is used by the feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

/// Properties of a station registry feature.
///
/// The registry spells the key `kurzname`; the other feeds use `Kurzname`.
#[derive(Debug, Deserialize)]
pub struct StationProperties {
    #[serde(rename = "kurzname", alias = "Kurzname")]
    pub short_name: ShortName,
    #[serde(rename = "Haltestellenname", default)]
    pub name: Option<String>,
    #[serde(rename = "Betriebsbereich")]
    pub mode: OperatingMode,
    #[serde(rename = "Haltestellenbereich")]
    pub area_code: AreaCode,
}

/// Properties of a station location feature.
#[derive(Debug, Deserialize)]
pub struct LocationProperties {
    #[serde(rename = "Kurzname", alias = "kurzname")]
    pub short_name: ShortName,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

/// Properties of a stairs or elevator feature.
#[derive(Debug, Deserialize)]
pub struct FacilityProperties {
    #[serde(rename = "Kennung", deserialize_with = "text_or_number")]
    pub id: String,
    #[serde(rename = "Kurzname", alias = "kurzname")]
    pub short_name: ShortName,
    #[serde(rename = "Haltestellenbereich")]
    pub area_code: AreaCode,
    #[serde(rename = "Bezeichnung", default)]
    pub description: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Info", alias = "Status", default)]
    pub status: Option<serde_json::Value>,
}

/// Accept a JSON string or number as text.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n.to_string()),
        Raw::Text(s) => Ok(s),
    }
}
