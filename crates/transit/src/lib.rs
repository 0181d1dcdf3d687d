//! # dojade-transit
//!
//! Domain logic for the Kiedyś Dojadę trip planner: backend wire models,
//! route segmentation, departure timing and diacritic-aware stop search.
//!
//! ## Features
//!
//! - **Wire models**: serde types matching the routing backend's JSON
//! - **Route processing**: raw stop-by-stop paths to labeled, colored
//!   line segments with countdown status
//! - **Stop search**: alias- and diacritic-aware fuzzy ranking for
//!   autocomplete
//! - **No IO**: networking and caching live in `dojade-core` on top
//!
//! ## Example
//!
//! ```
//! use dojade_transit::prelude::*;
//!
//! fn stop(code: &str) -> Stop {
//!     Stop {
//!         id: 0,
//!         code: StopCode::new(code),
//!         name: code.into(),
//!         lat: 52.41,
//!         lon: 16.92,
//!         zone_id: "A".into(),
//!     }
//! }
//!
//! fn leg(code: &str, line: Option<&str>) -> PathElement {
//!     PathElement {
//!         stop: stop(code),
//!         line: line.map(LineRef::new),
//!         departure_time: Some("12:00:00".into()),
//!         arrival_time: Some("12:10:00".into()),
//!     }
//! }
//!
//! // Tram 5 to the interchange, then tram 12 onward.
//! let path = vec![
//!     leg("MT01", None),
//!     leg("KAP01", Some("5")),
//!     leg("BAL01", Some("12")),
//! ];
//!
//! let segments = split_into_segments(&path);
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].line_number(), "5");
//! assert_eq!(segments[1].line_number(), "12");
//! ```

pub mod identifiers;
pub mod models;
pub mod routes;
pub mod search;
pub mod time;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{
        alerts::{Alert, AlertCategory, VoteDirection},
        path::{strip_group_boundaries, Path, PathElement},
        shapes::ShapePoint,
        stops::{Stop, StopGroup},
        timetable::{DropOffType, PickupType, TimetableEntry},
    };
    pub use crate::routes::{
        process_paths, split_into_segments, LineInfo, RouteSummary, SegmentKind,
    };
    pub use crate::search::{suggest, DEFAULT_SUGGESTION_LIMIT};
    pub use crate::time::{Clock, ClockTime, DepartureStatus, SystemClock};
}

pub use prelude::*;
