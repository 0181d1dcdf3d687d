//! Wire data models for the planner backend.

pub mod alerts;
pub mod path;
pub mod shapes;
pub mod stops;
pub mod timetable;

// Re-exports for convenience
pub use alerts::{Alert, AlertCategory, VoteDirection};
pub use path::{strip_group_boundaries, Path, PathElement};
pub use shapes::ShapePoint;
pub use stops::{Stop, StopGroup};
pub use timetable::{DropOffType, PickupType, TimetableEntry};
