//! Terminal rendering of planner data.

use chrono::{DateTime, Utc};

use dojade_core::alerts::format_age;
use dojade_core::transit::models::{Alert, StopGroup, TimetableEntry};
use dojade_core::transit::routes::RouteSummary;
use dojade_core::transit::time::display_clock;

/// `KAP    Rondo Kaponiera`
pub fn group_line(group: &StopGroup) -> String {
    format!("{:<6} {}", group.group_code.as_str(), group.group_name)
}

/// Header line plus one indented line per leg.
pub fn route_block(route: &RouteSummary) -> String {
    let mut block = format!(
        "{} -> {}  ({} min)  {}",
        route.departure_time, route.arrive_time, route.route_time, route.status
    );
    for segment in &route.lines {
        let label = if segment.is_walk() {
            "pieszo"
        } else {
            segment.line_number()
        };
        block.push_str(&format!(
            "\n  {:<8} {} -> {}",
            label,
            segment.start_code.as_str(),
            segment.end_code.as_str()
        ));
    }
    block
}

/// `14:33  5      Górczyn`
pub fn timetable_line(entry: &TimetableEntry) -> String {
    format!(
        "{}  {:<6} {}",
        display_clock(Some(&entry.departure_time)),
        entry.route_id.as_str(),
        entry.stop_headsign
    )
}

/// `👮 Kanar        linia 16   score +3  12 min temu`
pub fn alert_line(alert: &Alert, now: DateTime<Utc>) -> String {
    let line = match &alert.line {
        Some(line) => format!("linia {line}"),
        None => "-".to_owned(),
    };
    format!(
        "{} {:<12} {:<10} score {:+}  {}",
        alert.category.glyph(),
        alert.category.label(),
        line,
        alert.score,
        format_age(alert.since, now)
    )
}
