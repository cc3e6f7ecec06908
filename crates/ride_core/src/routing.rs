//! Pluggable directions backends: trait abstraction over an external
//! routing service.
//!
//! The HTTP implementation targets a Google-style directions endpoint:
//! `GET {endpoint}/api/directions/json?origin={lat},{lng}&destination={lat},{lng}&key={key}`
//! returning `{routes:[{legs:[{duration:{value: seconds}}]}]}`. Tests
//! substitute scripted doubles through [`DirectionsProvider`].

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::spatial::Coordinate;

/// Environment variable holding the routing-service API key.
pub const DIRECTIONS_API_KEY_VAR: &str = "DIRECTIONS_API_KEY";

/// Environment variable overriding the routing-service endpoint.
pub const DIRECTIONS_ENDPOINT_VAR: &str = "DIRECTIONS_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com";

/// Errors surfaced by a single directions query. Each query is attempted
/// exactly once; there is no retry layer.
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Transport-level failure (DNS, connect, body read).
    #[error("directions transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response; carries the status code only.
    #[error("directions http error, status: {0}")]
    Status(u16),
    /// Response parsed but contained no usable route or leg.
    #[error("directions response contained no route")]
    NoRoute,
}

/// Trait for directions backends. Implementations must be `Send + Sync` so a
/// provider can be shared across concurrent per-marker queries.
pub trait DirectionsProvider: Send + Sync {
    /// Travel time in seconds, taken from the first leg of the first route
    /// returned for `origin` → `destination`.
    async fn leg_duration_secs(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, DirectionsError>;
}

/// Routing-service endpoint and credentials, read from the environment.
///
/// A missing key is not validated here: queries simply fail at call time
/// with whatever status the vendor returns.
#[derive(Clone, Debug)]
pub struct DirectionsConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl DirectionsConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var(DIRECTIONS_ENDPOINT_VAR)
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            api_key: std::env::var(DIRECTIONS_API_KEY_VAR).unwrap_or_default(),
        }
    }
}

/// Directions backend backed by the vendor HTTP API.
#[derive(Clone, Debug)]
pub struct HttpDirectionsProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpDirectionsProvider {
    pub fn new(config: DirectionsConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    fn query_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/api/directions/json?origin={},{}&destination={},{}&key={}",
            self.endpoint,
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
            self.api_key,
        )
    }
}

/// Minimal directions JSON response structures.
#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    duration: LegDuration,
}

#[derive(Deserialize)]
struct LegDuration {
    value: f64, // seconds
}

fn first_leg_secs(body: DirectionsResponse) -> Result<f64, DirectionsError> {
    body.routes
        .into_iter()
        .next()
        .and_then(|route| route.legs.into_iter().next())
        .map(|leg| leg.duration.value)
        .ok_or(DirectionsError::NoRoute)
}

impl DirectionsProvider for HttpDirectionsProvider {
    async fn leg_duration_secs(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, DirectionsError> {
        let url = self.query_url(origin, destination);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DirectionsError::Status(response.status().as_u16()));
        }
        let body: DirectionsResponse = response.json().await?;
        first_leg_secs(body)
    }
}
