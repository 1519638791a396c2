//! Conversion from raw features to typed records.
//!
//! Malformed features are skipped with a warning naming the feed and the
//! feature's position; the rest of the collection is kept.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{
    Coordinates, FacilityKind, FacilityRecord, StationLocationRecord, StationRecord,
};

use super::FeedKind;
use super::error::RecordError;
use super::types::{
    FacilityProperties, Feature, FeatureCollection, Geometry, LocationProperties,
    StationProperties,
};

/// Parse the station registry.
pub fn parse_stations(collection: &FeatureCollection) -> Vec<StationRecord> {
    parse_each(FeedKind::Stations, collection, |feature| {
        let props: StationProperties = properties(feature)?;
        let name = props
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| props.short_name.to_string());
        Ok(StationRecord::new(
            props.short_name,
            name,
            props.mode,
            props.area_code,
        ))
    })
}

/// Parse the station location feed.
pub fn parse_locations(collection: &FeatureCollection) -> Vec<StationLocationRecord> {
    parse_each(FeedKind::Locations, collection, |feature| {
        let props: LocationProperties = properties(feature)?;
        Ok(StationLocationRecord {
            short_name: props.short_name,
            coordinates: point(feature)?,
            name: props.name,
        })
    })
}

/// Parse a stairs or elevator feed.
pub fn parse_facilities(kind: FacilityKind, collection: &FeatureCollection) -> Vec<FacilityRecord> {
    let feed = match kind {
        FacilityKind::Stairs => FeedKind::Stairs,
        FacilityKind::Elevator => FeedKind::Elevators,
    };
    parse_each(feed, collection, |feature| {
        let props: FacilityProperties = properties(feature)?;
        Ok(FacilityRecord {
            kind,
            id: props.id,
            short_name: props.short_name,
            area_code: props.area_code,
            coordinates: point(feature)?,
            description: props.description.or(props.name),
            status: props.status.and_then(status_text),
        })
    })
}

fn parse_each<T>(
    feed: FeedKind,
    collection: &FeatureCollection,
    parse: impl Fn(&Feature) -> Result<T, RecordError>,
) -> Vec<T> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| match parse(feature) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(feed = %feed, index, error = %e, "skipping malformed feature");
                None
            }
        })
        .collect()
}

fn properties<T: DeserializeOwned>(feature: &Feature) -> Result<T, RecordError> {
    let props = feature
        .properties
        .as_ref()
        .filter(|p| !p.is_null())
        .ok_or(RecordError::MissingProperties)?;
    Ok(T::deserialize(props)?)
}

fn point(feature: &Feature) -> Result<Coordinates, RecordError> {
    let Geometry { kind, coordinates } =
        feature.geometry.as_ref().ok_or(RecordError::MissingGeometry)?;

    if kind != "Point" {
        return Err(RecordError::Geometry(format!("expected Point, got {kind}")));
    }

    let pair = coordinates
        .as_array()
        .filter(|c| c.len() >= 2)
        .ok_or_else(|| RecordError::Geometry("expected [longitude, latitude]".to_string()))?;

    let lon = pair[0]
        .as_f64()
        .ok_or_else(|| RecordError::Geometry("longitude is not a number".to_string()))?;
    let lat = pair[1]
        .as_f64()
        .ok_or_else(|| RecordError::Geometry("latitude is not a number".to_string()))?;

    Coordinates::new(lon, lat).map_err(|e| RecordError::Geometry(e.to_string()))
}

fn status_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
