//! Shape enrichment: geometry for the segments of a processed route.
//!
//! Segments leave route processing with empty shapes. This module fills
//! them in afterwards, one fetch per vehicle segment, all segments of a
//! route in flight at once. A failed fetch downgrades that segment to
//! straight-line drawing; it never sinks the route.

use std::future::Future;
use std::pin::Pin;

use futures_util::future::join_all;

use dojade_transit::identifiers::{LineRef, StopCode};
use dojade_transit::models::ShapePoint;
use dojade_transit::routes::{LineInfo, RouteSummary};

use crate::api::{ApiClient, Result};

/// Where segment geometry comes from.
pub trait ShapeSource: Send + Sync {
    fn fetch_shape<'a>(
        &'a self,
        line: &'a LineRef,
        start: &'a StopCode,
        end: &'a StopCode,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ShapePoint>>> + Send + 'a>>;
}

impl ShapeSource for ApiClient {
    fn fetch_shape<'a>(
        &'a self,
        line: &'a LineRef,
        start: &'a StopCode,
        end: &'a StopCode,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ShapePoint>>> + Send + 'a>> {
        Box::pin(self.shape_between(line, start, end))
    }
}

/// Fill in the geometry of every vehicle segment of one route. Walk
/// segments are skipped; fetch failures leave that segment's shape empty.
pub async fn enrich_route(source: &dyn ShapeSource, route: &mut RouteSummary) {
    let fetched = join_all(route.lines.iter().map(|segment| fetch_for(source, segment))).await;
    for (segment, shape) in route.lines.iter_mut().zip(fetched) {
        segment.shape = shape;
    }
}

pub async fn enrich_routes(source: &dyn ShapeSource, routes: &mut [RouteSummary]) {
    for route in routes.iter_mut() {
        enrich_route(source, route).await;
    }
}

async fn fetch_for(source: &dyn ShapeSource, segment: &LineInfo) -> Vec<ShapePoint> {
    let Some(line) = segment.line() else {
        return Vec::new();
    };
    match source
        .fetch_shape(line, &segment.start_code, &segment.end_code)
        .await
    {
        Ok(points) => points,
        Err(err) => {
            tracing::warn!("shape fetch for line {line} failed: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use chrono::{NaiveDate, NaiveDateTime};
    use dojade_transit::models::{PathElement, Stop};
    use dojade_transit::routes::process_paths;
    use reqwest::StatusCode;

    /// Answers every line with one waypoint, except the designated
    /// failure, and records which lines were asked for.
    struct CannedShapes {
        fail_line: &'static str,
        asked: std::sync::Mutex<Vec<String>>,
    }

    impl CannedShapes {
        fn failing(fail_line: &'static str) -> Self {
            Self {
                fail_line,
                asked: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl ShapeSource for CannedShapes {
        fn fetch_shape<'a>(
            &'a self,
            line: &'a LineRef,
            _start: &'a StopCode,
            _end: &'a StopCode,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ShapePoint>>> + Send + 'a>> {
            Box::pin(async move {
                self.asked.lock().unwrap().push(line.to_string());
                if line.as_str() == self.fail_line {
                    return Err(ApiError::Status {
                        url: "http://backend.test/api/shapes".to_owned(),
                        status: StatusCode::INTERNAL_SERVER_ERROR,
                    });
                }
                Ok(vec![ShapePoint {
                    id: 1,
                    lat: 52.4,
                    lon: 16.9,
                    sequence: 0,
                }])
            })
        }
    }

    fn leg(code: &str, line: Option<&str>) -> PathElement {
        PathElement {
            stop: Stop {
                id: 0,
                code: StopCode::new(code),
                name: code.into(),
                lat: 52.4,
                lon: 16.9,
                zone_id: "A".into(),
            },
            line: line.map(LineRef::new),
            departure_time: Some("12:00:00".into()),
            arrival_time: Some("12:10:00".into()),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_failed_segment_keeps_empty_shape() {
        let path = vec![
            leg("A", None),
            leg("B", Some("5")),
            leg("C", Some("13")),
            leg("D", Some("9")),
        ];
        let mut routes = process_paths(vec![path], now());
        let source = CannedShapes::failing("13");

        enrich_routes(&source, &mut routes).await;

        let segments = &routes[0].lines;
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].shape.len(), 1);
        assert!(segments[1].shape.is_empty());
        assert_eq!(segments[2].shape.len(), 1);
    }

    #[tokio::test]
    async fn test_walk_segments_are_never_fetched() {
        let path = vec![
            leg("A", None),
            leg("B", Some("5")),
            leg("C", Some("WALK")),
            leg("D", Some("9")),
        ];
        let mut routes = process_paths(vec![path], now());
        let source = CannedShapes::failing("none");

        enrich_route(&source, &mut routes[0]).await;

        let asked = source.asked.lock().unwrap();
        assert_eq!(*asked, vec!["5".to_owned(), "9".to_owned()]);
        assert!(routes[0].lines[1].shape.is_empty());
    }
}
