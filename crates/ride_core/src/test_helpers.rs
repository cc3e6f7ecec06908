//! Test helpers for common test setup and utilities.
//!
//! This module provides shared doubles and fixtures to reduce duplication
//! across test files.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::remote::{FetchError, RequestOptions, ResourceClient};
use crate::routing::{DirectionsError, DirectionsProvider};
use crate::spatial::{Coordinate, Driver};

/// A rider position used across test files for consistency (San Francisco).
pub fn test_rider() -> Coordinate {
    Coordinate::new(37.7749, -122.4194)
}

/// A destination across town from [`test_rider`].
pub fn test_destination() -> Coordinate {
    Coordinate::new(37.8044, -122.2712)
}

/// Build a driver record with the given identity and default vendor fields.
pub fn sample_driver(id: u64, first: &str, last: &str) -> Driver {
    Driver {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        profile_image_url: None,
        car_image_url: None,
        car_seats: Some(4),
        rating: Some(4.8),
    }
}

/// Directions double replaying scripted leg outcomes in call order.
///
/// Each query pops the front of the script; an exhausted script answers
/// [`DirectionsError::NoRoute`].
pub struct ScriptedDirectionsProvider {
    script: Mutex<VecDeque<Result<f64, DirectionsError>>>,
    calls: Mutex<Vec<(Coordinate, Coordinate)>>,
}

impl ScriptedDirectionsProvider {
    pub fn new(script: Vec<Result<f64, DirectionsError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The (origin, destination) pairs queried so far, in call order.
    pub fn calls(&self) -> Vec<(Coordinate, Coordinate)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl DirectionsProvider for ScriptedDirectionsProvider {
    async fn leg_duration_secs(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, DirectionsError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((origin, destination));
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(Err(DirectionsError::NoRoute))
    }
}

/// One scripted resource response: an optional delay before it resolves,
/// then the body (or failure) it resolves with.
pub struct ScriptedResponse {
    pub delay: Duration,
    pub outcome: Result<serde_json::Value, FetchError>,
}

impl ScriptedResponse {
    pub fn ready(outcome: Result<serde_json::Value, FetchError>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome,
        }
    }

    pub fn delayed(delay: Duration, outcome: Result<serde_json::Value, FetchError>) -> Self {
        Self { delay, outcome }
    }
}

/// Resource-client double replaying scripted responses in call order.
///
/// Delays are driven by the tokio timer so tests can interleave concurrent
/// refetches deterministically. An exhausted script answers a 404.
pub struct ScriptedResourceClient {
    script: Mutex<VecDeque<ScriptedResponse>>,
    requested_urls: Mutex<Vec<String>>,
}

impl ScriptedResourceClient {
    pub fn new(script: Vec<ScriptedResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requested_urls: Mutex::new(Vec::new()),
        }
    }

    /// The URLs requested so far, in call order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested_urls
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

impl ResourceClient for ScriptedResourceClient {
    async fn fetch(
        &self,
        url: &str,
        _options: &RequestOptions,
    ) -> Result<serde_json::Value, FetchError> {
        if let Ok(mut urls) = self.requested_urls.lock() {
            urls.push(url.to_string());
        }
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());
        match next {
            Some(response) => {
                if !response.delay.is_zero() {
                    tokio::time::sleep(response.delay).await;
                }
                response.outcome
            }
            None => Err(FetchError::Status(404)),
        }
    }
}
