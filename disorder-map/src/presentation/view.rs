//! Map view, tile layer, and icon settings.

use serde::Serialize;

use super::MarkerKind;

/// Initial map position and base layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// `[latitude, longitude]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: TileLayer,
    pub focus: FocusSettings,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            // Cologne city centre
            center: [50.9413, 6.9583],
            zoom: 13,
            tiles: TileLayer::default(),
            focus: FocusSettings::default(),
        }
    }
}

/// Camera animation used when a marker is clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSettings {
    pub zoom: u8,
    pub duration_secs: f64,
    pub ease_linearity: f64,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            zoom: 16,
            duration_secs: 1.5,
            ease_linearity: 0.2,
        }
    }
}

/// A raster tile layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub subdomains: String,
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
                .to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> \
                          contributors &copy; <a href=\"https://carto.com/\">CARTO</a>"
                .to_string(),
            subdomains: "abcd".to_string(),
            max_zoom: 19,
        }
    }
}

/// Marker icon geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    pub icon_url: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub class_name: String,
}

impl IconSpec {
    pub fn new(icon_url: impl Into<String>) -> Self {
        Self {
            icon_url: icon_url.into(),
            icon_size: [50, 50],
            icon_anchor: [15, 50],
            popup_anchor: [0, -50],
            class_name: "icon".to_string(),
        }
    }
}

/// One icon per marker kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconSet {
    pub station: IconSpec,
    pub stairs: IconSpec,
    pub elevator: IconSpec,
}

impl IconSet {
    /// Icons served below the given static prefix, e.g. `/static/icons`.
    pub fn under(prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        Self {
            station: IconSpec::new(format!("{prefix}/station.svg")),
            stairs: IconSpec::new(format!("{prefix}/stairs.svg")),
            elevator: IconSpec::new(format!("{prefix}/elevator.svg")),
        }
    }

    pub fn get(&self, kind: MarkerKind) -> &IconSpec {
        match kind {
            MarkerKind::Station => &self.station,
            MarkerKind::Stairs => &self.stairs,
            MarkerKind::Elevator => &self.elevator,
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::under("/static/icons")
    }
}
