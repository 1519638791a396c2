//! Domain types for the disorder map.
//!
//! Records here are built at the feed-parsing boundary and are valid by
//! construction, so the reconciliation code never re-checks them.

mod ids;
mod joined;
mod mode;
mod records;

pub use ids::{AreaCode, InvalidId, ShortName};
pub use joined::{JoinedFacility, JoinedStation};
pub use mode::OperatingMode;
pub use records::{
    Coordinates, FacilityKind, FacilityRecord, InvalidCoordinates, StationInfo,
    StationLocationRecord, StationRecord,
};
