//! Wall-clock helpers for departure timing.
//!
//! The backend ships bare `HH:MM:SS` strings with no date or zone
//! attached. Everything here interprets them against local wall time,
//! which is what a rider standing at the stop compares against.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Timelike, Utc};

/// Placeholder shown when a wire timestamp is missing or empty.
pub const MISSING_CLOCK: &str = "--:--";

/// Hour after which a departure earlier than "now" is read as tomorrow's
/// rather than one already missed.
pub const LATE_NIGHT_HOUR: u32 = 20;

/// Countdown minutes at which the display collapses to the literal clock
/// time.
pub const COUNTDOWN_LIMIT_MIN: i64 = 100;

// ============================================================================
// Clock seam
// ============================================================================

/// Time source, injected so countdowns and cache expiry are deterministic
/// under test.
pub trait Clock: Send + Sync {
    /// Instant in UTC, for absolute timestamps (cache stamps, alert ages).
    fn now_utc(&self) -> DateTime<Utc>;

    /// Local wall-clock date and time, what departures are compared
    /// against.
    fn now_local(&self) -> NaiveDateTime;
}

/// System time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

// ============================================================================
// Clock times
// ============================================================================

/// Hour/minute pair taken from a wire timestamp or typed by a rider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Lenient parse for backend data: read the leading `H[H]:M[M]` and
    /// ignore any seconds. Out-of-range or garbled input is `None`, never
    /// an error, so one bad record cannot blank a result list.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(3, ':');
        let hour = parts.next()?.trim().parse().ok()?;
        let minute = parts.next()?.trim().parse().ok()?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    fn as_naive(&self) -> NaiveTime {
        // Fields are range-checked on construction.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid clock time (expected HH:MM): {0:?}")]
pub struct ParseClockTimeError(String);

/// Strict `HH:MM` parse for user input. Seconds are rejected here; riders
/// type `16:30`, not `16:30:00`.
impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.matches(':').count() != 1 {
            return Err(ParseClockTimeError(s.to_owned()));
        }
        Self::parse_lenient(trimmed).ok_or_else(|| ParseClockTimeError(s.to_owned()))
    }
}

/// Minute-precision display form of a raw wire timestamp: the leading
/// `HH:MM` of an `HH:MM:SS` string, or the placeholder when the value is
/// missing or empty.
pub fn display_clock(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !s.is_empty() => s.chars().take(5).collect(),
        _ => MISSING_CLOCK.to_owned(),
    }
}

// ============================================================================
// Departure status
// ============================================================================

/// Resolve a bare departure clock against "now".
///
/// The departure is pinned to today's date; when that instant is already
/// past and the evening is late (`now.hour() > LATE_NIGHT_HOUR`), the
/// departure is assumed to be tomorrow's. This is a heuristic, not
/// calendar logic; swapping in real service-date handling only means
/// replacing this function.
pub fn next_departure_after(now: NaiveDateTime, departure: ClockTime) -> NaiveDateTime {
    let today = now.date().and_time(departure.as_naive());
    if today < now && now.hour() > LATE_NIGHT_HOUR {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Rider-facing departure state of one itinerary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DepartureStatus {
    /// Leaves soon; countdown in whole minutes, never negative.
    DepartsIn(i64),
    /// Leaves far enough out that the clock time reads better than a
    /// countdown.
    DepartsAt(String),
    /// The scheduled departure is already in the past.
    Departed,
}

impl DepartureStatus {
    /// Compute the state for a departure display string at a local
    /// instant.
    ///
    /// An unparsable clock lands on [`DepartureStatus::DepartsAt`] with
    /// the placeholder; malformed data degrades, it does not error.
    pub fn at(now: NaiveDateTime, departure_display: &str) -> Self {
        let Some(clock) = ClockTime::parse_lenient(departure_display) else {
            return Self::DepartsAt(MISSING_CLOCK.to_owned());
        };

        let instant = next_departure_after(now, clock);
        if instant < now {
            return Self::Departed;
        }

        let minutes = (instant - now).num_minutes().max(0);
        if minutes >= COUNTDOWN_LIMIT_MIN {
            Self::DepartsAt(departure_display.to_owned())
        } else {
            Self::DepartsIn(minutes)
        }
    }

    /// Bare status label as the product words it.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DepartsIn(_) => "Odjazd za",
            Self::DepartsAt(_) => "Odjazd o",
            Self::Departed => "Odjechał",
        }
    }
}

impl fmt::Display for DepartureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepartsIn(minutes) => write!(f, "Odjazd za {minutes} min"),
            Self::DepartsAt(clock) => write!(f, "Odjazd o {clock}"),
            Self::Departed => write!(f, "Odjechał"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(ClockTime::parse_lenient("14:05:30"), ClockTime::new(14, 5));
        assert_eq!(ClockTime::parse_lenient("7:30"), ClockTime::new(7, 30));
        assert_eq!(ClockTime::parse_lenient("--:--"), None);
        assert_eq!(ClockTime::parse_lenient(""), None);
        assert_eq!(ClockTime::parse_lenient("25:00"), None); // out of range
        assert_eq!(ClockTime::parse_lenient("14"), None); // no minutes
    }

    #[test]
    fn test_strict_parse_rejects_seconds() {
        assert!("16:30".parse::<ClockTime>().is_ok());
        assert!("16:30:00".parse::<ClockTime>().is_err());
        assert!("kiedyś".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_display_clock() {
        assert_eq!(display_clock(Some("06:15:00")), "06:15");
        assert_eq!(display_clock(Some("6:15")), "6:15");
        assert_eq!(display_clock(Some("")), "--:--");
        assert_eq!(display_clock(None), "--:--");
    }

    #[test]
    fn test_countdown_is_never_negative() {
        // Departure one minute out.
        let status = DepartureStatus::at(local(12, 0), "12:01");
        assert_eq!(status, DepartureStatus::DepartsIn(1));

        // Departure exactly now: zero, not negative.
        let status = DepartureStatus::at(local(12, 0), "12:00");
        assert_eq!(status, DepartureStatus::DepartsIn(0));
    }

    #[test]
    fn test_past_departure_before_late_night_is_departed() {
        // 14:00, departure was 10:00: no wraparound at hour 14.
        let status = DepartureStatus::at(local(14, 0), "10:00");
        assert_eq!(status, DepartureStatus::Departed);
    }

    #[test]
    fn test_late_night_wraps_to_tomorrow() {
        // 23:30, departure 00:15 reads as tomorrow morning, 45 min out.
        let status = DepartureStatus::at(local(23, 30), "00:15");
        assert_eq!(status, DepartureStatus::DepartsIn(45));

        let instant = next_departure_after(local(23, 30), ClockTime::new(0, 15).unwrap());
        assert_eq!(instant, local(0, 15) + Duration::days(1));
    }

    #[test]
    fn test_no_wrap_at_exactly_hour_20() {
        // The heuristic demands hour > 20; at 20:xx a past departure is
        // simply gone.
        let status = DepartureStatus::at(local(20, 59), "20:00");
        assert_eq!(status, DepartureStatus::Departed);
    }

    #[test]
    fn test_distant_departure_shows_clock() {
        let status = DepartureStatus::at(local(12, 0), "14:00");
        assert_eq!(status, DepartureStatus::DepartsAt("14:00".into()));
        assert_eq!(status.label(), "Odjazd o");
    }

    #[test]
    fn test_boundary_at_100_minutes() {
        let status = DepartureStatus::at(local(12, 0), "13:39");
        assert_eq!(status, DepartureStatus::DepartsIn(99));

        let status = DepartureStatus::at(local(12, 0), "13:40");
        assert_eq!(status, DepartureStatus::DepartsAt("13:40".into()));
    }

    #[test]
    fn test_unparsable_clock_degrades() {
        let status = DepartureStatus::at(local(12, 0), "--:--");
        assert_eq!(status, DepartureStatus::DepartsAt(MISSING_CLOCK.into()));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DepartureStatus::DepartsIn(5).to_string(), "Odjazd za 5 min");
        assert_eq!(
            DepartureStatus::DepartsAt("17:20".into()).to_string(),
            "Odjazd o 17:20"
        );
        assert_eq!(DepartureStatus::Departed.to_string(), "Odjechał");
    }
}
