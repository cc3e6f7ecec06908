//! Geographic primitives: coordinates, map viewports, and marker placement.
//!
//! This module provides:
//!
//! - **Coordinate / Region**: plain lat/lng value types shared across the crate
//! - **Marker synthesis**: scatter a fetched driver list around the rider for display
//! - **Region fitting**: compute a viewport that frames the rider and destination

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-width in degrees of the random scatter applied to synthesized markers.
pub const MARKER_JITTER_DEGREES: f64 = 0.005;

/// Street-level span used when only the rider position is known.
pub const DEFAULT_SPAN_DEGREES: f64 = 0.005;

/// Padding factor applied to the rider/destination bounding span so neither
/// point sits flush against the map edge.
pub const REGION_PADDING: f64 = 1.2;

/// A geographic position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A map viewport: center plus span on each axis. The zero region is the
/// degenerate "no location yet" viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// A driver record as returned by the remote driver listing. Immutable
/// snapshot of vendor fields; never mutated locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub car_image_url: Option<String>,
    #[serde(default)]
    pub car_seats: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A displayable map marker derived from a driver record and a synthesized
/// position. Owned by transient view state, recomputed whenever the driver
/// list or rider position changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerData {
    pub driver: Driver,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
}

impl MarkerData {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Synthesize display markers by scattering each driver around the rider.
///
/// Each marker gets an independent uniform offset in
/// [-[`MARKER_JITTER_DEGREES`], [`MARKER_JITTER_DEGREES`]] on each axis.
/// Input order and the full driver record are preserved; `title` is
/// `"first last"`.
///
/// The placement is a presentation stand-in, not a real driver position —
/// callers must not treat it as authoritative. If real positions become
/// available this function should be replaced, not reused.
pub fn markers_from_drivers<R: Rng>(
    drivers: &[Driver],
    rider: Coordinate,
    rng: &mut R,
) -> Vec<MarkerData> {
    drivers
        .iter()
        .map(|driver| {
            let lat_offset = (rng.gen::<f64>() - 0.5) * (MARKER_JITTER_DEGREES * 2.0);
            let lng_offset = (rng.gen::<f64>() - 0.5) * (MARKER_JITTER_DEGREES * 2.0);
            MarkerData {
                title: format!("{} {}", driver.first_name, driver.last_name),
                latitude: rider.latitude + lat_offset,
                longitude: rider.longitude + lng_offset,
                driver: driver.clone(),
            }
        })
        .collect()
}

/// Compute the viewport framing the rider and (optionally) the destination.
///
/// Priority order:
///
/// 1. No rider position yet: the zero region.
/// 2. Rider only: centered on the rider with a fixed street-level span.
/// 3. Both: centered on the midpoint; span is [`REGION_PADDING`] times the
///    absolute coordinate delta on each axis.
///
/// Deterministic given its inputs; no I/O. Absence is `None`, so a rider at
/// exactly (0, 0) is a valid position.
pub fn region_fitting(rider: Option<Coordinate>, destination: Option<Coordinate>) -> Region {
    let Some(rider) = rider else {
        return Region::default();
    };
    let Some(destination) = destination else {
        return Region {
            latitude: rider.latitude,
            longitude: rider.longitude,
            latitude_delta: DEFAULT_SPAN_DEGREES,
            longitude_delta: DEFAULT_SPAN_DEGREES,
        };
    };

    Region {
        latitude: (rider.latitude + destination.latitude) / 2.0,
        longitude: (rider.longitude + destination.longitude) / 2.0,
        latitude_delta: (destination.latitude - rider.latitude).abs() * REGION_PADDING,
        longitude_delta: (destination.longitude - rider.longitude).abs() * REGION_PADDING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn driver(id: u64, first: &str, last: &str) -> Driver {
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

    #[test]
    fn region_without_rider_is_zero() {
        let region = region_fitting(None, Some(Coordinate::new(10.0, 10.0)));
        assert_eq!(region, Region::default());
    }

    #[test]
    fn region_with_rider_only_uses_default_span() {
        let rider = Coordinate::new(52.52, 13.405);
        let region = region_fitting(Some(rider), None);
        assert_eq!(
            region,
            Region {
                latitude: 52.52,
                longitude: 13.405,
                latitude_delta: DEFAULT_SPAN_DEGREES,
                longitude_delta: DEFAULT_SPAN_DEGREES,
            }
        );
    }

    #[test]
    fn region_with_both_points_centers_on_midpoint_with_padding() {
        let rider = Coordinate::new(0.0, 0.0);
        let destination = Coordinate::new(10.0, 10.0);
        let region = region_fitting(Some(rider), Some(destination));
        assert_eq!(
            region,
            Region {
                latitude: 5.0,
                longitude: 5.0,
                latitude_delta: 12.0,
                longitude_delta: 12.0,
            }
        );
    }

    #[test]
    fn region_treats_origin_rider_as_present() {
        // (0, 0) is a valid position, not a missing one.
        let region = region_fitting(Some(Coordinate::new(0.0, 0.0)), None);
        assert_eq!(region.latitude_delta, DEFAULT_SPAN_DEGREES);
    }

    #[test]
    fn region_span_is_symmetric_in_direction() {
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(-10.0, -20.0);
        let forward = region_fitting(Some(a), Some(b));
        let backward = region_fitting(Some(b), Some(a));
        assert_eq!(forward.latitude_delta, backward.latitude_delta);
        assert_eq!(forward.longitude_delta, backward.longitude_delta);
        assert_eq!(forward.latitude, backward.latitude);
    }

    #[test]
    fn markers_preserve_count_order_and_titles() {
        let drivers = vec![
            driver(1, "Ada", "Lovelace"),
            driver(2, "Alan", "Turing"),
            driver(3, "Grace", "Hopper"),
        ];
        let rider = Coordinate::new(37.7749, -122.4194);
        let mut rng = StdRng::seed_from_u64(42);

        let markers = markers_from_drivers(&drivers, rider, &mut rng);

        assert_eq!(markers.len(), drivers.len());
        assert_eq!(markers[0].title, "Ada Lovelace");
        assert_eq!(markers[1].title, "Alan Turing");
        assert_eq!(markers[2].title, "Grace Hopper");
        assert_eq!(markers[1].driver, drivers[1]);
    }

    #[test]
    fn markers_stay_within_jitter_bounds() {
        let drivers: Vec<Driver> = (0..50)
            .map(|i| driver(i, "Test", "Driver"))
            .collect();
        let rider = Coordinate::new(37.7749, -122.4194);
        let mut rng = StdRng::seed_from_u64(7);

        for marker in markers_from_drivers(&drivers, rider, &mut rng) {
            assert!((marker.latitude - rider.latitude).abs() <= MARKER_JITTER_DEGREES);
            assert!((marker.longitude - rider.longitude).abs() <= MARKER_JITTER_DEGREES);
        }
    }

    #[test]
    fn markers_from_empty_driver_list_are_empty() {
        let rider = Coordinate::new(1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(markers_from_drivers(&[], rider, &mut rng).is_empty());
    }
}
