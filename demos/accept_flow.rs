//! Walk through the accept-task flow: select a task, accept it, and
//! build the hand-off URL for the external maps app.
//!
//! Run with: cargo run --example accept_flow

use task_mapper::{
    external_route_url, external_route_url_with_stops, samples, MapViewState, TravelMode,
    ViewEvent,
};

fn main() {
    let tasks = samples::sample_tasks();
    let mut state = MapViewState::new(samples::CAMPUS_CENTER);

    println!("Accept Flow");
    println!("===========\n");

    // Tap the grocery delivery task
    let delivery = tasks
        .iter()
        .find(|t| t.pickup.is_some())
        .expect("fixtures include a delivery task");

    state.apply(ViewEvent::TaskSelected {
        task_id: delivery.id.clone(),
    });
    println!("Selected: {} (${:.2})", delivery.title, delivery.pay);
    println!("          {}\n", delivery.description);

    // Accept it
    state.apply(ViewEvent::AcceptToggled {
        task_id: delivery.id.clone(),
    });
    println!(
        "Accepted tasks: {:?}, effective status now {:?}\n",
        state.accepted,
        state.effective_status(delivery)
    );

    // Hand off to the external maps app
    let simple = external_route_url(&state.pin, &delivery.location, TravelMode::Walking);
    println!("Navigate:\n  {}\n", simple);

    if let (Some(pickup), Some(dropoff)) = (delivery.pickup, delivery.dropoff) {
        let multi = external_route_url_with_stops(
            &state.pin,
            &[pickup],
            &dropoff,
            TravelMode::Bicycling,
        );
        println!("Via pickup (best-effort multi-stop):\n  {}", multi);
    }
}
