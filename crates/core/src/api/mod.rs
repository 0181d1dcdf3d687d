//! Typed client for the planner backend.
//!
//! One method per endpoint, each decoding straight into the wire models
//! from `dojade-transit`. Alert listing is the odd one out: the board
//! refreshes on a timer, so its fetch failures degrade to an empty list
//! instead of erroring.

pub mod error;

pub use error::{ApiError, Result};

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use dojade_transit::identifiers::{AlertId, GroupCode, LineRef, StopCode};
use dojade_transit::models::{
    Alert, AlertCategory, Path, ShapePoint, StopGroup, TimetableEntry, VoteDirection,
};
use dojade_transit::time::ClockTime;

use crate::config::ClientConfig;

/// Prefix the path endpoint expects in front of a group code.
const GROUP_CODE_PREFIX: &str = "GRP:";

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|err| ApiError::Config(err.to_string()))?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;

        Ok(Self { http, base })
    }

    /// Every stop group in the network. Slow-moving reference data; the
    /// planner caches it on disk.
    pub async fn stop_groups(&self) -> Result<Vec<StopGroup>> {
        let url = self.endpoint("stops/groupnames")?;
        self.get_json(url).await
    }

    /// Raw itinerary paths between two stop groups, soonest first.
    /// `departure` bounds the search to departures at or after that time;
    /// `None` means "now" on the backend clock.
    pub async fn paths(
        &self,
        start: &GroupCode,
        end: &GroupCode,
        departure: Option<ClockTime>,
    ) -> Result<Vec<Path>> {
        let mut url = self.endpoint("path")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("start_code", &group_query_code(start));
            query.append_pair("end_code", &group_query_code(end));
            if let Some(at) = departure {
                query.append_pair("departure_time", &at.to_string());
            }
        }
        self.get_json(url).await
    }

    /// Remaining departures from one physical stop today.
    pub async fn timetable(&self, stop: &StopCode) -> Result<Vec<TimetableEntry>> {
        let mut url = self.endpoint("stop_times/stop")?;
        url.query_pairs_mut().append_pair("stop", stop.as_str());
        self.get_json(url).await
    }

    /// The stop group nearest to a coordinate.
    pub async fn closest_group(&self, lat: f64, lon: f64) -> Result<StopGroup> {
        let mut url = self.endpoint("stops/closest")?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string());
        self.get_json(url).await
    }

    /// Geometry waypoints a line follows between two physical stops.
    pub async fn shape_between(
        &self,
        line: &LineRef,
        start: &StopCode,
        end: &StopCode,
    ) -> Result<Vec<ShapePoint>> {
        let mut url = self.endpoint(&format!("shapes/{line}/between"))?;
        url.query_pairs_mut()
            .append_pair("start_code", start.as_str())
            .append_pair("end_code", end.as_str());
        self.get_json(url).await
    }

    /// Current alert board. The backend answers `null` when the board is
    /// empty, and any fetch failure degrades to an empty list with a
    /// warning; refresh loops stay alive either way.
    pub async fn alerts(&self) -> Result<Vec<Alert>> {
        let url = self.endpoint("alerts")?;
        match self.get_json::<Option<Vec<Alert>>>(url).await {
            Ok(alerts) => Ok(alerts.unwrap_or_default()),
            Err(err) => {
                tracing::warn!("alert refresh failed: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Report an incident at a coordinate, optionally pinned to a line.
    pub async fn create_alert(
        &self,
        lat: f64,
        lon: f64,
        line: Option<&LineRef>,
        category: AlertCategory,
    ) -> Result<()> {
        let url = self.endpoint("alerts/new")?;
        let body = NewAlert {
            lat,
            lon,
            line,
            category,
        };
        let response = self
            .http
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        expect_success(&url, response.status())
    }

    pub async fn vote_alert(&self, id: &AlertId, direction: VoteDirection) -> Result<()> {
        let url = self.endpoint(&format!("alerts/{id}/{direction}"))?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        expect_success(&url, response.status())
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = self.endpoint("login")?;
        let body = Credentials { email, password };
        let response = self
            .http
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(ApiError::Auth(format!(
                "Login failed: {}",
                response.status()
            )));
        }
        let token: TokenResponse =
            response
                .json()
                .await
                .map_err(|source| ApiError::Decode {
                    url: url.to_string(),
                    source,
                })?;
        Ok(token.token)
    }

    /// Create an account. The backend explains rejections in a `message`
    /// field; that text is surfaced verbatim when present.
    pub async fn register(&self, email: &str, password: &str, username: &str) -> Result<()> {
        let url = self.endpoint("register")?;
        let body = Registration {
            email,
            password,
            username,
        };
        let response = self
            .http
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let bytes = response.bytes().await.unwrap_or_default();
        Err(ApiError::Auth(registration_error(status, &bytes)))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|err| ApiError::Config(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        expect_success(&url, response.status())?;
        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

// ============================================================================
// Wire payloads and helpers
// ============================================================================

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct Registration<'a> {
    email: &'a str,
    password: &'a str,
    username: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct NewAlert<'a> {
    lat: f64,
    lon: f64,
    line: Option<&'a LineRef>,
    category: AlertCategory,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn expect_success(url: &Url, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status,
        })
    }
}

/// The path endpoint addresses groups as `GRP:<code>`.
fn group_query_code(code: &GroupCode) -> String {
    format!("{GROUP_CODE_PREFIX}{code}")
}

fn registration_error(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| status.to_string());
    format!("Registration failed: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = ClientConfig {
            base_url: "http://backend.test/api".to_owned(),
            ..ClientConfig::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let api = client();
        let url = api.endpoint("stops/groupnames").unwrap();

        // Without the slash, join would replace the /api segment.
        assert_eq!(url.as_str(), "http://backend.test/api/stops/groupnames");
    }

    #[test]
    fn test_group_query_code_is_prefixed() {
        assert_eq!(group_query_code(&GroupCode::new("KAP")), "GRP:KAP");
    }

    #[test]
    fn test_vote_endpoint_spells_direction() {
        let api = client();
        let id = AlertId::new("42");

        let up = api
            .endpoint(&format!("alerts/{id}/{}", VoteDirection::Up))
            .unwrap();
        assert_eq!(up.as_str(), "http://backend.test/api/alerts/42/up");
    }

    #[test]
    fn test_registration_error_prefers_backend_message() {
        let body = br#"{"message":"email already in use"}"#;
        let message = registration_error(StatusCode::CONFLICT, body);

        assert_eq!(message, "Registration failed: email already in use");
    }

    #[test]
    fn test_registration_error_falls_back_to_status() {
        let message = registration_error(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(message, "Registration failed: 500 Internal Server Error");
    }

    #[test]
    fn test_empty_board_decodes_from_null() {
        let alerts: Option<Vec<Alert>> = serde_json::from_str("null").unwrap();
        assert!(alerts.is_none());
    }
}
