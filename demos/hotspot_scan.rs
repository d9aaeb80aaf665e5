//! Run hotspot detection over the fixture task feed.
//!
//! Run with: cargo run --example hotspot_scan

use task_mapper::{detect_hotspots, samples, HotspotConfig};

fn main() {
    let tasks = samples::sample_tasks();
    let config = HotspotConfig::default();

    println!("Hotspot Scan");
    println!(
        "Config: radius={}m, min_neighbors={}, min_intensity={}\n",
        config.cluster_radius_meters, config.min_neighbors, config.min_intensity
    );
    println!("Scanning {} tasks...\n", tasks.len());

    let hotspots = detect_hotspots(&tasks, &config);

    if hotspots.is_empty() {
        println!("No hotspots found.");
        return;
    }

    for (i, spot) in hotspots.iter().enumerate() {
        println!(
            "{}. {} tasks at ({:.5}, {:.5}), intensity {:.2}",
            i + 1,
            spot.task_count,
            spot.center.latitude,
            spot.center.longitude,
            spot.intensity
        );
        for id in &spot.task_ids {
            let title = tasks
                .iter()
                .find(|t| &t.id == id)
                .map(|t| t.title.as_str())
                .unwrap_or("?");
            println!("     - {} ({})", title, id);
        }
        println!();
    }

    let clustered: u32 = hotspots.iter().map(|h| h.task_count).sum();
    println!(
        "{} of {} tasks fall inside a hotspot.",
        clustered,
        tasks.len()
    );
}
