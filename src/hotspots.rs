//! Hotspot detection over task locations.
//!
//! Groups nearby open tasks into circular regions of high local density
//! so the map can render "lots of work here" overlays instead of a
//! hundred individual markers.
//!
//! The algorithm is density-ranked greedy grouping: tasks with the most
//! neighbors within the clustering radius seed groups first, and every
//! task joins at most one group per pass. Results are recomputed from
//! scratch whenever the task set changes; hotspots carry no identity
//! between passes.

use crate::geo_utils::{compute_center, haversine_distance, meters_to_degrees};
use crate::{GeoPoint, Task};
use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};
use serde::{Deserialize, Serialize};

/// Configuration for hotspot detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct HotspotConfig {
    /// Neighbor radius in meters; also the radius of emitted hotspots
    /// (default: 200m)
    pub cluster_radius_meters: f64,
    /// Minimum number of *other* tasks within the radius for a task to
    /// seed a group (default: 3)
    pub min_neighbors: u32,
    /// Minimum intensity for a group to be emitted. Groups below this
    /// still consume their members (default: 0.4, the intensity of a
    /// four-task group)
    pub min_intensity: f64,
    /// Group size at which intensity saturates to 1.0 (default: 10)
    pub full_intensity_count: u32,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            cluster_radius_meters: 200.0,
            min_neighbors: 3,
            min_intensity: 0.4,
            full_intensity_count: 10,
        }
    }
}

/// A derived circular region summarizing a local cluster of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Hotspot {
    /// Arithmetic-mean centroid of the member locations
    pub center: GeoPoint,
    /// Region radius in meters (the clustering radius, not member spread)
    pub radius_meters: f64,
    /// Number of member tasks
    pub task_count: u32,
    /// Normalized density in [0, 1]: min(task_count / full_intensity_count, 1)
    pub intensity: f64,
    /// Member task ids, seed first
    pub task_ids: Vec<String>,
}

/// Spatial index entry: [lng, lat] plus index into the valid-location list.
type IndexedLocation = GeomWithData<[f64; 2], usize>;

/// Detect hotspots over the given tasks.
///
/// Deterministic for a fixed input order and configuration. Tasks with
/// invalid coordinates are ignored; an empty (or all-invalid) task set
/// yields an empty result. Every task contributes to at most one hotspot.
///
/// # Example
///
/// ```rust
/// use task_mapper::{detect_hotspots, samples, HotspotConfig};
///
/// let hotspots = detect_hotspots(&samples::sample_tasks(), &HotspotConfig::default());
/// for spot in &hotspots {
///     assert!(spot.intensity > 0.0 && spot.intensity <= 1.0);
/// }
/// ```
pub fn detect_hotspots(tasks: &[Task], config: &HotspotConfig) -> Vec<Hotspot> {
    // (task index, location) for every task we can place on the map
    let locations: Vec<(usize, GeoPoint)> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.location.is_valid())
        .map(|(i, t)| (i, t.location))
        .collect();

    if locations.is_empty() {
        return vec![];
    }

    let tree = RTree::bulk_load(
        locations
            .iter()
            .enumerate()
            .map(|(i, (_, p))| IndexedLocation::new([p.longitude, p.latitude], i))
            .collect(),
    );

    let neighbor_lists = collect_neighbors(&tree, &locations, config.cluster_radius_meters);

    // Densest seeds first; index breaks ties so output is stable
    let mut order: Vec<usize> = (0..locations.len()).collect();
    order.sort_by(|&a, &b| {
        neighbor_lists[b]
            .len()
            .cmp(&neighbor_lists[a].len())
            .then(a.cmp(&b))
    });

    let mut used = vec![false; locations.len()];
    let mut hotspots = Vec::new();

    for &seed in &order {
        if used[seed] {
            continue;
        }
        if neighbor_lists[seed].len() < config.min_neighbors as usize {
            continue;
        }

        let mut members = vec![seed];
        members.extend(neighbor_lists[seed].iter().copied().filter(|&j| !used[j]));
        for &m in &members {
            used[m] = true;
        }

        let intensity =
            (members.len() as f64 / config.full_intensity_count as f64).min(1.0);
        if intensity < config.min_intensity {
            continue;
        }

        let member_points: Vec<GeoPoint> = members.iter().map(|&m| locations[m].1).collect();
        hotspots.push(Hotspot {
            center: compute_center(&member_points),
            radius_meters: config.cluster_radius_meters,
            task_count: members.len() as u32,
            intensity,
            task_ids: members
                .iter()
                .map(|&m| tasks[locations[m].0].id.clone())
                .collect(),
        });
    }

    hotspots
}

/// Neighbor indices within `radius_meters` for every location.
///
/// Envelope query on the R-tree first, exact haversine check second.
fn collect_neighbors(
    tree: &RTree<IndexedLocation>,
    locations: &[(usize, GeoPoint)],
    radius_meters: f64,
) -> Vec<Vec<usize>> {
    #[cfg(feature = "parallel")]
    let lists: Vec<Vec<usize>> = {
        use rayon::prelude::*;
        (0..locations.len())
            .into_par_iter()
            .map(|i| neighbors_of(tree, locations, i, radius_meters))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let lists: Vec<Vec<usize>> = (0..locations.len())
        .map(|i| neighbors_of(tree, locations, i, radius_meters))
        .collect();

    lists
}

fn neighbors_of(
    tree: &RTree<IndexedLocation>,
    locations: &[(usize, GeoPoint)],
    i: usize,
    radius_meters: f64,
) -> Vec<usize> {
    let point = locations[i].1;
    let half = meters_to_degrees(radius_meters, point.latitude);
    let envelope = AABB::from_corners(
        [point.longitude - half, point.latitude - half],
        [point.longitude + half, point.latitude + half],
    );

    let mut found: Vec<usize> = tree
        .locate_in_envelope_intersecting(&envelope)
        .map(|entry| entry.data)
        .filter(|&j| j != i)
        .filter(|&j| haversine_distance(&point, &locations[j].1) <= radius_meters)
        .collect();
    found.sort_unstable();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TaskStatus, TaskCategory};

    fn make_task(id: &str, lat: f64, lng: f64) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            location: GeoPoint::new(lat, lng),
            pay: 10.0,
            status: TaskStatus::Open,
            category: Some(TaskCategory::Errand),
            pickup: None,
            dropoff: None,
        }
    }

    /// n tasks in a tight square grid near the given origin, all within
    /// a few tens of meters of each other.
    fn tight_cluster(prefix: &str, n: usize, lat: f64, lng: f64) -> Vec<Task> {
        (0..n)
            .map(|i| {
                make_task(
                    &format!("{}-{}", prefix, i),
                    lat + (i / 2) as f64 * 0.0002,
                    lng + (i % 2) as f64 * 0.0002,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let hotspots = detect_hotspots(&[], &HotspotConfig::default());
        assert!(hotspots.is_empty());
    }

    #[test]
    fn test_four_tasks_within_fifty_meters_form_one_hotspot() {
        let tasks = tight_cluster("a", 4, 37.78825, -122.4324);
        let hotspots = detect_hotspots(&tasks, &HotspotConfig::default());

        assert_eq!(hotspots.len(), 1);
        let spot = &hotspots[0];
        assert_eq!(spot.task_count, 4);
        assert_eq!(spot.intensity, 0.4);
        assert_eq!(spot.radius_meters, 200.0);

        let mut ids = spot.task_ids.clone();
        ids.sort();
        assert_eq!(ids, vec!["a-0", "a-1", "a-2", "a-3"]);

        // Centroid lands inside the cluster footprint
        assert!((spot.center.latitude - 37.78835).abs() < 0.001);
    }

    #[test]
    fn test_scattered_tasks_yield_no_hotspots() {
        // Three tasks roughly 5km apart
        let tasks = vec![
            make_task("a", 37.7880, -122.4320),
            make_task("b", 37.8330, -122.4320),
            make_task("c", 37.7880, -122.3750),
        ];
        let hotspots = detect_hotspots(&tasks, &HotspotConfig::default());
        assert!(hotspots.is_empty());
    }

    #[test]
    fn test_no_task_in_two_hotspots() {
        let mut tasks = tight_cluster("north", 5, 37.7960, -122.4324);
        tasks.extend(tight_cluster("south", 5, 37.7780, -122.4324));

        let hotspots = detect_hotspots(&tasks, &HotspotConfig::default());
        assert_eq!(hotspots.len(), 2);

        let mut all_ids: Vec<&str> = hotspots
            .iter()
            .flat_map(|h| h.task_ids.iter().map(String::as_str))
            .collect();
        let total = all_ids.len();
        all_ids.sort_unstable();
        all_ids.dedup();
        assert_eq!(all_ids.len(), total, "a task appeared in two hotspots");
        assert_eq!(total, 10);
    }

    #[test]
    fn test_member_count_meets_minimum() {
        let config = HotspotConfig::default();
        let hotspots = detect_hotspots(
            &tight_cluster("a", 12, 37.78825, -122.4324),
            &config,
        );
        for spot in &hotspots {
            assert!(spot.task_count > config.min_neighbors);
        }
    }

    #[test]
    fn test_intensity_saturates_at_one() {
        let tasks = tight_cluster("a", 12, 37.78825, -122.4324);
        let hotspots = detect_hotspots(&tasks, &HotspotConfig::default());
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].task_count, 12);
        assert_eq!(hotspots[0].intensity, 1.0);
    }

    #[test]
    fn test_min_intensity_suppresses_small_groups() {
        let config = HotspotConfig {
            min_intensity: 0.5,
            ..HotspotConfig::default()
        };
        // Four tasks have intensity 0.4 - below the stricter cut
        let hotspots = detect_hotspots(&tight_cluster("a", 4, 37.78825, -122.4324), &config);
        assert!(hotspots.is_empty());

        // Five tasks reach 0.5
        let hotspots = detect_hotspots(&tight_cluster("b", 5, 37.78825, -122.4324), &config);
        assert_eq!(hotspots.len(), 1);
    }

    #[test]
    fn test_deterministic_output() {
        let mut tasks = tight_cluster("a", 6, 37.78825, -122.4324);
        tasks.extend(tight_cluster("b", 4, 37.7960, -122.4200));

        let config = HotspotConfig::default();
        let first = detect_hotspots(&tasks, &config);
        let second = detect_hotspots(&tasks, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_locations_ignored() {
        let mut tasks = tight_cluster("a", 4, 37.78825, -122.4324);
        tasks.push(make_task("bad", f64::NAN, -122.4324));

        let hotspots = detect_hotspots(&tasks, &HotspotConfig::default());
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].task_count, 4);
    }

    #[test]
    fn test_densest_seed_wins() {
        // A dense knot of 6 with a 3-task fringe 150m away: the knot
        // seeds first and absorbs what it can reach
        let mut tasks = tight_cluster("core", 6, 37.78825, -122.4324);
        tasks.push(make_task("edge-0", 37.78960, -122.4324));
        tasks.push(make_task("edge-1", 37.78962, -122.4326));
        tasks.push(make_task("edge-2", 37.78964, -122.4322));

        let hotspots = detect_hotspots(&tasks, &HotspotConfig::default());
        assert!(!hotspots.is_empty());
        // The seed of the first (densest) hotspot comes from the core
        assert!(hotspots[0].task_ids[0].starts_with("core"));
    }
}
