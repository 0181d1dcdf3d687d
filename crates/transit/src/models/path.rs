//! Raw itinerary paths as returned by the routing backend.

use serde::{Deserialize, Serialize};

use super::stops::Stop;
use crate::identifiers::LineRef;

/// One stop visited on a journey, annotated with the line used to *reach*
/// it.
///
/// `line` is `None` or a sentinel (see [`LineRef`]) on walking and
/// group-boundary placeholders. Times are raw `HH:MM:SS` wire strings and
/// may be missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub stop: Stop,
    pub line: Option<LineRef>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

/// Ordered stop sequence from origin to destination.
pub type Path = Vec<PathElement>;

/// Drop the synthetic group-boundary elements bracketing a fetched path.
///
/// The backend wraps every path in one placeholder per end; the slice in
/// between holds the itinerary's real endpoints. Paths too short to carry
/// real content come back empty.
pub fn strip_group_boundaries(path: &[PathElement]) -> &[PathElement] {
    if path.len() < 3 {
        return &[];
    }
    &path[1..path.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::StopCode;

    fn element(code: &str, line: Option<&str>) -> PathElement {
        PathElement {
            stop: Stop {
                id: 1,
                code: StopCode::new(code),
                name: code.into(),
                lat: 52.4,
                lon: 16.9,
                zone_id: "A".into(),
            },
            line: line.map(LineRef::new),
            departure_time: Some("12:00:00".into()),
            arrival_time: Some("12:00:00".into()),
        }
    }

    #[test]
    fn test_strip_group_boundaries() {
        let path = vec![
            element("MT", Some("GROUP_NODE")),
            element("MT01", None),
            element("KAP01", Some("5")),
            element("KAP", Some("GROUP_NODE")),
        ];

        let inner = strip_group_boundaries(&path);
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[0].stop.code, StopCode::new("MT01"));
        assert_eq!(inner[1].stop.code, StopCode::new("KAP01"));
    }

    #[test]
    fn test_strip_degenerate_paths() {
        assert!(strip_group_boundaries(&[]).is_empty());

        let two = vec![element("A", None), element("B", None)];
        assert!(strip_group_boundaries(&two).is_empty());
    }

    #[test]
    fn test_path_element_tolerates_nulls() {
        let json = r#"{
            "stop": {"id": 9, "code": "MT01", "name": "Most Teatralny", "lat": 52.4094, "lon": 16.9166, "zone_id": "A"},
            "line": null,
            "departure_time": null,
            "arrival_time": null
        }"#;

        let element: PathElement = serde_json::from_str(json).unwrap();
        assert!(element.line.is_none());
        assert!(element.departure_time.is_none());
    }
}
