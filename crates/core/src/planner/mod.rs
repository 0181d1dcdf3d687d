//! Trip planning orchestration.
//!
//! Ties the API client, the disk cache and the route pipeline together:
//! fetch paths, strip their group boundary markers, process them into
//! summaries, then fill in segment geometry. The stop group directory is
//! the one thing served cache-first; everything else is live.

pub mod shapes;

pub use shapes::{enrich_route, enrich_routes, ShapeSource};

use std::sync::Arc;

use dojade_transit::identifiers::{GroupCode, StopCode};
use dojade_transit::models::{strip_group_boundaries, Path, StopGroup, TimetableEntry};
use dojade_transit::routes::{process_paths, RouteSummary};
use dojade_transit::search;
use dojade_transit::time::{Clock, ClockTime, SystemClock};

use crate::api::{ApiClient, Result};
use crate::cache::CacheStore;

/// Cache key for the stop group directory.
pub const STOP_GROUPS_CACHE_KEY: &str = "stop_groups";

pub struct TripPlanner {
    api: ApiClient,
    cache: CacheStore,
    clock: Arc<dyn Clock>,
}

impl TripPlanner {
    pub fn new(api: ApiClient, cache: CacheStore) -> Self {
        Self::with_clock(api, cache, Arc::new(SystemClock))
    }

    pub fn with_clock(api: ApiClient, cache: CacheStore, clock: Arc<dyn Clock>) -> Self {
        Self { api, cache, clock }
    }

    /// The stop group directory, served from cache when fresh. A failed
    /// cache write is logged and otherwise ignored; the fetched data is
    /// still returned.
    pub async fn stop_groups(&self) -> Result<Vec<StopGroup>> {
        if let Some(groups) = self.cache.get::<Vec<StopGroup>>(STOP_GROUPS_CACHE_KEY) {
            tracing::debug!("stop groups served from cache ({} groups)", groups.len());
            return Ok(groups);
        }

        let groups = self.api.stop_groups().await?;
        if let Err(err) = self.cache.set(STOP_GROUPS_CACHE_KEY, &groups) {
            tracing::debug!("stop group cache write failed: {err}");
        }
        Ok(groups)
    }

    /// Name suggestions for a partial query, best match first.
    pub async fn suggest(&self, query: &str, limit: usize) -> Result<Vec<StopGroup>> {
        let groups = self.stop_groups().await?;
        Ok(search::suggest(query, &groups, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Plan routes between two stop groups, shapes included. `departure`
    /// bounds the search to that time or later; `None` plans from now.
    pub async fn plan(
        &self,
        start: &GroupCode,
        end: &GroupCode,
        departure: Option<ClockTime>,
    ) -> Result<Vec<RouteSummary>> {
        let paths = self.api.paths(start, end, departure).await?;
        let trimmed: Vec<Path> = paths
            .iter()
            .map(|path| strip_group_boundaries(path).to_vec())
            .collect();

        let mut routes = process_paths(trimmed, self.clock.now_local());
        enrich_routes(&self.api, &mut routes).await;
        Ok(routes)
    }

    /// Remaining departures from a physical stop today.
    pub async fn departures(&self, stop: &StopCode) -> Result<Vec<TimetableEntry>> {
        self.api.timetable(stop).await
    }

    /// The closest stop group to a coordinate, with its distance in meters.
    pub async fn nearest(&self, lat: f64, lon: f64) -> Result<(StopGroup, f64)> {
        let group = self.api.closest_group(lat, lon).await?;
        let distance = group.distance_meters(geo::Point::new(lon, lat));
        Ok((group, distance))
    }
}
