//! Fetch a walking route from the directions service and print the
//! decoded geometry.
//!
//! Run with: DIRECTIONS_API_KEY=... cargo run --example fetch_route --features http

use task_mapper::{samples, DirectionsClient, GeoPoint, TravelMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("DIRECTIONS_API_KEY")
        .map_err(|_| "set DIRECTIONS_API_KEY to run this demo")?;

    let origin = samples::CAMPUS_CENTER;
    let destination = GeoPoint::new(37.79108, -122.42950); // library entrance

    println!(
        "Fetching walking route ({:.5}, {:.5}) -> ({:.5}, {:.5})...",
        origin.latitude, origin.longitude, destination.latitude, destination.longitude
    );

    let client = DirectionsClient::new(&api_key)?;
    let route = client
        .fetch_route(&origin, &destination, TravelMode::Walking)
        .await?;

    println!(
        "Route: {:.0}m, {:.0}s, {} points",
        route.distance_meters,
        route.duration_seconds,
        route.points.len()
    );

    if let Some(bounds) = route.bounds() {
        println!(
            "Fit camera to ({:.5}, {:.5}) .. ({:.5}, {:.5})",
            bounds.min_lat, bounds.min_lng, bounds.max_lat, bounds.max_lng
        );
    }

    for (i, p) in route.points.iter().enumerate().take(10) {
        println!("  {:2}: {:.5}, {:.5}", i, p.latitude, p.longitude);
    }
    if route.points.len() > 10 {
        println!("  ... {} more", route.points.len() - 10);
    }

    Ok(())
}
