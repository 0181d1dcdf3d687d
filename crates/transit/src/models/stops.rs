//! Stops and rider-facing stop groups.

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

use crate::identifiers::{GroupCode, StopCode};

/// A physical boarding point. Immutable reference data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: i64,
    pub code: StopCode,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub zone_id: String,
}

impl Stop {
    pub fn location(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

/// A named cluster of stops sharing one rider-facing name, e.g. all
/// platforms of an interchange. Origin/destination selection works on
/// groups; one group maps to many physical [`Stop`]s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopGroup {
    pub group_code: GroupCode,
    pub group_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl StopGroup {
    pub fn location(&self) -> Point {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance in meters from an arbitrary point.
    pub fn distance_meters(&self, from: Point) -> f64 {
        from.haversine_distance(&self.location())
    }
}
