//! Route processing: raw backend paths to display-ready summaries.
//!
//! The pipeline is split in two: [`split_into_segments`] finds the
//! same-line runs of a path, [`process_paths`] wraps them with timing,
//! status and identity. Shape geometry is deliberately absent here;
//! `dojade-core` fills it in asynchronously after the fact.

pub mod segments;
pub mod summary;

// Re-exports for convenience
pub use segments::{split_into_segments, LineInfo, SegmentKind, SEGMENT_PALETTE, WALK_COLOR};
pub use summary::{process_paths, RouteSummary};
