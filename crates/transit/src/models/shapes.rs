//! Line geometry waypoints.

use geo::Point;
use serde::{Deserialize, Serialize};

/// One waypoint of a line's physical road/track geometry between two
/// stops. `sequence` orders the points along the polyline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub sequence: u32,
}

impl ShapePoint {
    pub fn location(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}
