//! Crowd-sourced service alerts.

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::identifiers::{AlertId, LineRef};

/// The closed set of report categories riders can file.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertCategory {
    Inspector,
    Malfunction,
    Accident,
    Delay,
}

impl AlertCategory {
    /// Rider-facing label. The product UI is Polish.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inspector => "Kanar",
            Self::Malfunction => "Awaria",
            Self::Accident => "Wypadek",
            Self::Delay => "Opóźnienie",
        }
    }

    /// Marker glyph for compact display.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Inspector => "👮",
            Self::Malfunction => "🚧",
            Self::Accident => "💥",
            Self::Delay => "🕒",
        }
    }
}

/// Voting direction on an existing alert. Displays as the URL path
/// segment the vote endpoints expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Score delta a front end applies optimistically while the next poll
    /// is still out.
    pub fn delta(&self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// One live report as served by the alert endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub lat: f64,
    pub lon: f64,
    pub line: Option<LineRef>,
    pub category: AlertCategory,
    pub score: i64,
    pub since: DateTime<Utc>,
    /// Minutes of lifetime left. The wire spells the field `remaning`.
    #[serde(rename = "remaning")]
    pub remaining: i64,
}

impl Alert {
    pub fn location(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}
