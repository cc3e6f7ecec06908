//! Fetch a driver list, scatter markers around the rider, fit the viewport,
//! and estimate pickup/trip times and fares against the live directions API.
//!
//! Run with: cargo run -p ride_core --example quote_demo
//!
//! Expects `DRIVER_API_URL` and `DIRECTIONS_API_KEY` in the environment (or
//! a `.env` file).

use rand::rngs::StdRng;
use rand::SeedableRng;
use ride_core::estimator::estimate_times_and_prices;
use ride_core::remote::{HttpRemoteResource, HttpResourceClient, RequestOptions};
use ride_core::routing::{DirectionsConfig, HttpDirectionsProvider};
use ride_core::spatial::{markers_from_drivers, region_fitting, Coordinate, Driver};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    ride_core::logging::init_logging();

    // Mission District pickup, Oakland drop-off.
    let rider = Coordinate::new(37.7599, -122.4148);
    let destination = Coordinate::new(37.8044, -122.2712);

    let driver_url = std::env::var("DRIVER_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api/driver".to_string());
    let resource: HttpRemoteResource<Vec<Driver>> = HttpRemoteResource::new(
        HttpResourceClient::new(),
        driver_url,
        RequestOptions::default(),
    );

    resource.refetch().await;
    let state = resource.state();
    if let Some(err) = state.error {
        eprintln!("driver list unavailable: {err}");
        return;
    }
    let drivers = state.data.unwrap_or_default();
    println!("--- Quote flow ({} drivers) ---", drivers.len());

    let mut rng = StdRng::seed_from_u64(123);
    let markers = markers_from_drivers(&drivers, rider, &mut rng);

    let region = region_fitting(Some(rider), Some(destination));
    println!(
        "viewport: center=({:.4}, {:.4}) span=({:.4}, {:.4})",
        region.latitude, region.longitude, region.latitude_delta, region.longitude_delta
    );

    let provider = HttpDirectionsProvider::new(DirectionsConfig::from_env());
    match estimate_times_and_prices(&provider, &markers, Some(rider), Some(destination)).await {
        Some(timed) => {
            for quote in timed {
                println!(
                    "  {}  {:.1} min  ${}",
                    quote.marker.title, quote.time_minutes, quote.price
                );
            }
        }
        None => println!("estimation unavailable"),
    }
}
