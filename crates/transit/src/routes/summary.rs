//! Display-ready route summaries.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;

use crate::models::path::Path;
use crate::time::{display_clock, ClockTime, DepartureStatus};

use super::segments::{split_into_segments, LineInfo};

/// Fallback duration when the schedule times are missing or degenerate.
const DEFAULT_ROUTE_TIME_MIN: i64 = 20;

/// Process-wide sequence feeding route ids. Wall-clock ids collided when
/// two searches landed in the same millisecond.
static ROUTE_SEQ: AtomicU64 = AtomicU64::new(0);

/// One itinerary option, ready for list display and map drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSummary {
    /// Unique for the lifetime of the process.
    pub id: String,
    pub status: DepartureStatus,
    pub lines: Vec<LineInfo>,
    /// `HH:MM` display string, or the placeholder.
    pub departure_time: String,
    /// `HH:MM` display string, or the placeholder.
    pub arrive_time: String,
    /// Scheduled duration in minutes.
    pub route_time: i64,
    /// The boundary-stripped path, kept for the detail view.
    pub path: Path,
}

impl RouteSummary {
    /// Recompute the departure state against a later instant. Front ends
    /// tick this to keep countdowns live without refetching.
    pub fn status_at(&self, now: NaiveDateTime) -> DepartureStatus {
        DepartureStatus::at(now, &self.departure_time)
    }
}

/// Transform boundary-stripped paths into route summaries.
///
/// Paths shorter than two elements, and paths whose segmentation comes up
/// empty, are filtered out silently. Input order is preserved: the first
/// summary is the default choice a front end highlights.
pub fn process_paths(paths: Vec<Path>, now: NaiveDateTime) -> Vec<RouteSummary> {
    paths
        .into_iter()
        .enumerate()
        .filter_map(|(idx, path)| build_summary(idx, path, now))
        .collect()
}

fn build_summary(path_idx: usize, path: Path, now: NaiveDateTime) -> Option<RouteSummary> {
    if path.len() < 2 {
        return None;
    }

    let lines = split_into_segments(&path);
    if lines.is_empty() {
        return None;
    }

    let departure_time = display_clock(path.first()?.departure_time.as_deref());
    let arrive_time = display_clock(path.last()?.arrival_time.as_deref());
    let status = DepartureStatus::at(now, &departure_time);
    let route_time = scheduled_minutes(&departure_time, &arrive_time);
    let seq = ROUTE_SEQ.fetch_add(1, Ordering::Relaxed);

    Some(RouteSummary {
        id: format!("route-{path_idx}-{seq}"),
        status,
        lines,
        departure_time,
        arrive_time,
        route_time,
        path,
    })
}

/// Minute difference between the displayed clocks. Zero and unparsable
/// input both fall back to the historical default rather than erroring.
fn scheduled_minutes(departure: &str, arrival: &str) -> i64 {
    let (Some(dep), Some(arr)) = (
        ClockTime::parse_lenient(departure),
        ClockTime::parse_lenient(arrival),
    ) else {
        return DEFAULT_ROUTE_TIME_MIN;
    };

    match arr.minutes_since_midnight() - dep.minutes_since_midnight() {
        0 => DEFAULT_ROUTE_TIME_MIN,
        diff => diff,
    }
}
