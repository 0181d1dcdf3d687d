//! Crowd-sourced alert board.
//!
//! Holds the last fetched set of alerts and the operations riders take on
//! it. The board is poll-based: callers refresh on an interval, and a
//! vote nudges the local copy immediately so the UI reacts before the
//! next poll lands.

use chrono::{DateTime, Utc};

use dojade_transit::identifiers::{AlertId, LineRef};
use dojade_transit::models::{Alert, AlertCategory, VoteDirection};

use crate::api::{ApiClient, Result};

/// How often front ends are expected to refresh the board.
pub const REFRESH_INTERVAL_SECS: u64 = 30;

pub struct AlertBoard {
    api: ApiClient,
    alerts: Vec<Alert>,
}

impl AlertBoard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            alerts: Vec::new(),
        }
    }

    /// The board as of the last refresh.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Replace the board with the backend's current state.
    pub async fn refresh(&mut self) -> Result<()> {
        self.alerts = self.api.alerts().await?;
        tracing::debug!("alert board refreshed: {} alerts", self.alerts.len());
        Ok(())
    }

    /// File a report, then refresh so the new alert shows up.
    pub async fn report(
        &mut self,
        lat: f64,
        lon: f64,
        line: Option<&LineRef>,
        category: AlertCategory,
    ) -> Result<()> {
        self.api.create_alert(lat, lon, line, category).await?;
        self.refresh().await
    }

    /// Cast a vote, adjusting the local score without waiting for the
    /// next poll.
    pub async fn vote(&mut self, id: &AlertId, direction: VoteDirection) -> Result<()> {
        self.api.vote_alert(id, direction).await?;
        apply_vote(&mut self.alerts, id, direction);
        Ok(())
    }
}

/// Nudge the score of one alert in place. A vote on an alert that already
/// fell off the board is a no-op.
fn apply_vote(alerts: &mut [Alert], id: &AlertId, direction: VoteDirection) {
    if let Some(alert) = alerts.iter_mut().find(|alert| alert.id == *id) {
        alert.score += direction.delta();
    }
}

/// Human age of an alert, bucketed the way riders read it.
pub fn format_age(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - since).num_minutes();
    if minutes < 1 {
        "przed chwilą".to_owned()
    } else if minutes < 60 {
        format!("{minutes} min temu")
    } else {
        format!("{} godz. temu", minutes / 60)
    }
}
