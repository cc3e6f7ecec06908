//! End-to-end flow: fetch drivers, place markers, fit the viewport, and
//! estimate times and fares, all against scripted backends.

use rand::rngs::StdRng;
use rand::SeedableRng;
use ride_core::estimator::estimate_times_and_prices;
use ride_core::remote::{RemoteResource, RequestOptions};
use ride_core::spatial::{
    markers_from_drivers, region_fitting, Driver, MARKER_JITTER_DEGREES,
};
use ride_core::test_helpers::{
    test_destination, test_rider, ScriptedDirectionsProvider, ScriptedResourceClient,
    ScriptedResponse,
};
use serde_json::json;

#[tokio::test]
async fn quote_flow_produces_a_timed_marker_per_driver() {
    let client = ScriptedResourceClient::new(vec![ScriptedResponse::ready(Ok(json!({
        "data": [
            { "id": 1, "first_name": "Ada", "last_name": "Lovelace", "car_seats": 4, "rating": 4.9 },
            { "id": 2, "first_name": "Alan", "last_name": "Turing", "car_seats": 5, "rating": 4.7 },
        ]
    })))]);
    let resource: RemoteResource<Vec<Driver>, _> =
        RemoteResource::new(client, "/api/driver", RequestOptions::default());

    resource.refetch().await;
    let drivers = resource.state().data.expect("driver list");
    assert_eq!(drivers.len(), 2);

    let rider = test_rider();
    let destination = test_destination();
    let mut rng = StdRng::seed_from_u64(11);
    let markers = markers_from_drivers(&drivers, rider, &mut rng);
    assert_eq!(markers.len(), 2);
    for marker in &markers {
        assert!((marker.latitude - rider.latitude).abs() <= MARKER_JITTER_DEGREES);
        assert!((marker.longitude - rider.longitude).abs() <= MARKER_JITTER_DEGREES);
    }

    let region = region_fitting(Some(rider), Some(destination));
    assert_eq!(region.latitude, (rider.latitude + destination.latitude) / 2.0);
    assert!(region.latitude_delta > 0.0);

    // Two legs per marker, in marker order.
    let provider = ScriptedDirectionsProvider::new(vec![
        Ok(300.0),
        Ok(600.0),
        Ok(120.0),
        Ok(600.0),
    ]);
    let timed = estimate_times_and_prices(&provider, &markers, Some(rider), Some(destination))
        .await
        .expect("estimates");

    assert_eq!(timed.len(), 2);
    assert_eq!(timed[0].marker.title, "Ada Lovelace");
    assert_eq!(timed[0].time_minutes, 15.0);
    assert_eq!(timed[0].price, "7.50");
    assert_eq!(timed[1].marker.title, "Alan Turing");
    assert_eq!(timed[1].time_minutes, 12.0);
    assert_eq!(timed[1].price, "6.00");
    assert_eq!(provider.calls().len(), 4);
}

#[tokio::test]
async fn quote_flow_before_destination_selection_shows_markers_only() {
    let client = ScriptedResourceClient::new(vec![ScriptedResponse::ready(Ok(json!({
        "data": [{ "id": 1, "first_name": "Grace", "last_name": "Hopper" }]
    })))]);
    let resource: RemoteResource<Vec<Driver>, _> =
        RemoteResource::new(client, "/api/driver", RequestOptions::default());

    resource.refetch().await;
    let drivers = resource.state().data.expect("driver list");

    let rider = test_rider();
    let mut rng = StdRng::seed_from_u64(5);
    let markers = markers_from_drivers(&drivers, rider, &mut rng);

    let region = region_fitting(Some(rider), None);
    assert_eq!(region.latitude, rider.latitude);
    assert_eq!(region.latitude_delta, 0.005);

    let provider = ScriptedDirectionsProvider::new(vec![]);
    let timed = estimate_times_and_prices(&provider, &markers, Some(rider), None).await;
    assert!(timed.is_none(), "not yet computable without a destination");
    assert!(provider.calls().is_empty());
}
