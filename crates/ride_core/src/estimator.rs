//! Per-driver pickup and trip time estimation over a directions backend.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::pricing::fare_for_minutes;
use crate::routing::{DirectionsError, DirectionsProvider};
use crate::spatial::{Coordinate, MarkerData};

/// A marker enriched with an estimated pickup+trip time and a quoted fare.
/// Derived once markers and destination are both known; invalidated whenever
/// the rider, destination, or marker set changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedMarker {
    pub marker: MarkerData,
    /// Driver→rider plus rider→destination travel time, in minutes.
    pub time_minutes: f64,
    /// Fare formatted to two decimals.
    pub price: String,
}

/// Estimate travel time and fare for every marker.
///
/// Returns `None` when either coordinate is still unknown — that is "not yet
/// computable", not an error, and nothing is logged. Otherwise each marker is
/// estimated from two directions queries, marker→rider then
/// rider→destination, summing the returned leg durations.
///
/// Per-marker estimates run concurrently with no ordering guarantee between
/// markers; the call resolves only when every marker settles. The batch is
/// all-or-nothing: any failed query voids the whole result, which is logged
/// and surfaced as `None`. Callers treat `None` as "estimation unavailable".
pub async fn estimate_times_and_prices<P: DirectionsProvider>(
    provider: &P,
    markers: &[MarkerData],
    rider: Option<Coordinate>,
    destination: Option<Coordinate>,
) -> Option<Vec<TimedMarker>> {
    let (Some(rider), Some(destination)) = (rider, destination) else {
        return None;
    };

    let estimates = try_join_all(markers.iter().map(|marker| async move {
        let to_rider = provider
            .leg_duration_secs(marker.coordinate(), rider)
            .await?;
        let to_destination = provider.leg_duration_secs(rider, destination).await?;
        let time_minutes = (to_rider + to_destination) / 60.0;
        Ok::<TimedMarker, DirectionsError>(TimedMarker {
            price: fare_for_minutes(time_minutes),
            time_minutes,
            marker: marker.clone(),
        })
    }))
    .await;

    match estimates {
        Ok(timed) => Some(timed),
        Err(err) => {
            error!("error calculating driver times: {err}");
            None
        }
    }
}
