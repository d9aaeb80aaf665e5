//! # Task Mapper
//!
//! Map engine for a campus task/errand marketplace app.
//!
//! This library provides:
//! - Hotspot detection over task locations (density-ranked greedy grouping)
//! - Encoded-polyline decoding for routes returned by a directions service
//! - Deep-link URL construction for handing navigation to an external maps app
//! - A serializable map view state driven by discrete events
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel processing with rayon
//! - **`http`** - Enable HTTP client for route fetching
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use task_mapper::{detect_hotspots, samples, HotspotConfig};
//!
//! let tasks = samples::sample_tasks();
//! let hotspots = detect_hotspots(&tasks, &HotspotConfig::default());
//!
//! for spot in &hotspots {
//!     println!(
//!         "{} tasks near ({:.5}, {:.5}), intensity {:.1}",
//!         spot.task_count, spot.center.latitude, spot.center.longitude, spot.intensity
//!     );
//! }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Result, TaskMapError};

pub mod geo_utils;

// Hotspot detection over task locations
pub mod hotspots;
pub use hotspots::{detect_hotspots, Hotspot, HotspotConfig};

// Encoded-polyline codec
pub mod polyline;
pub use polyline::{decode_polyline, encode_polyline};

// External-navigation deep links
pub mod navigation;
pub use navigation::{external_route_url, external_route_url_with_stops};

// Map view state and transitions
pub mod state;
pub use state::{MapViewState, ViewEvent};

// Fixture data used by the demos and tests
pub mod samples;

// HTTP module for route fetching
#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::DirectionsClient;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("TaskMapperRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use task_mapper::GeoPoint;
/// let point = GeoPoint::new(37.78825, -122.4324);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from geographic points.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Lifecycle state of a task in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum TaskStatus {
    Open,
    Accepted,
    Completed,
}

/// Broad category of a task, used for marker styling and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum TaskCategory {
    Delivery,
    Tutoring,
    Moving,
    Errand,
    Other,
}

/// A posted task: something a fellow student will pay to have done.
///
/// Delivery-style tasks carry optional pickup and dropoff points in
/// addition to their primary location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,
    /// Short title shown on the marker callout
    pub title: String,
    /// Longer description shown in the detail panel
    pub description: String,
    /// Where the task happens
    pub location: GeoPoint,
    /// Payment offered
    pub pay: f64,
    /// Lifecycle state
    pub status: TaskStatus,
    /// Optional category tag
    pub category: Option<TaskCategory>,
    /// Pickup point for delivery variants
    pub pickup: Option<GeoPoint>,
    /// Dropoff point for delivery variants
    pub dropoff: Option<GeoPoint>,
}

/// Category of a safe meeting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum SafePointCategory {
    Library,
    StudentCenter,
    CampusSecurity,
    Cafe,
    TransitHub,
}

/// A static, pre-defined public location suggested for in-person exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct SafeMeetingPoint {
    pub name: String,
    pub location: GeoPoint,
    pub category: SafePointCategory,
}

/// Travel mode for route fetching and navigation hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum TravelMode {
    Walking,
    Bicycling,
    Driving,
    Transit,
}

impl TravelMode {
    /// Query-parameter value understood by the directions service and
    /// the external maps app.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
        }
    }
}

impl Default for TravelMode {
    fn default() -> Self {
        TravelMode::Walking
    }
}

/// A fetched route ready for rendering: decoded geometry plus leg totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct RoutePath {
    /// Decoded overview polyline, in travel order
    pub points: Vec<GeoPoint>,
    /// Total distance across all legs, in meters
    pub distance_meters: f64,
    /// Total duration across all legs, in seconds
    pub duration_seconds: f64,
}

impl RoutePath {
    /// Bounding box of the route geometry, for fitting the map camera.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

// ============================================================================
// FFI Exports (only when feature enabled)
// ============================================================================

#[cfg(feature = "ffi")]
mod ffi {
    use super::*;
    use log::info;

    /// Detect hotspots over the given tasks.
    #[uniffi::export]
    pub fn ffi_detect_hotspots(tasks: Vec<Task>, config: HotspotConfig) -> Vec<Hotspot> {
        init_logging();
        info!(
            "[TaskMapperRust] detect_hotspots called with {} tasks",
            tasks.len()
        );

        let start = std::time::Instant::now();
        let hotspots = detect_hotspots(&tasks, &config);
        info!(
            "[TaskMapperRust] {} hotspots from {} tasks in {:?}",
            hotspots.len(),
            tasks.len(),
            start.elapsed()
        );

        hotspots
    }

    /// Get default hotspot detection configuration.
    #[uniffi::export]
    pub fn default_hotspot_config() -> HotspotConfig {
        HotspotConfig::default()
    }

    /// Decode an encoded overview polyline into coordinates.
    #[uniffi::export]
    pub fn ffi_decode_polyline(encoded: String) -> Result<Vec<GeoPoint>, TaskMapError> {
        init_logging();
        decode_polyline(&encoded)
    }

    /// Encode coordinates into an overview polyline string.
    #[uniffi::export]
    pub fn ffi_encode_polyline(points: Vec<GeoPoint>) -> String {
        encode_polyline(&points)
    }

    /// Build a deep-link URL for the external maps app.
    #[uniffi::export]
    pub fn ffi_external_route_url(
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
    ) -> String {
        external_route_url(&origin, &destination, mode)
    }

    /// Build a multi-stop deep-link URL (best-effort; see module docs).
    #[uniffi::export]
    pub fn ffi_external_route_url_with_stops(
        origin: GeoPoint,
        stops: Vec<GeoPoint>,
        destination: GeoPoint,
        mode: TravelMode,
    ) -> String {
        external_route_url_with_stops(&origin, &stops, &destination, mode)
    }

    /// Initial view state for a fresh map screen.
    #[uniffi::export]
    pub fn initial_view_state(pin: GeoPoint) -> MapViewState {
        MapViewState::new(pin)
    }

    /// Apply a view event and return the updated state.
    ///
    /// State crosses the FFI boundary by value; the mobile side replaces
    /// its copy with the returned value.
    #[uniffi::export]
    pub fn apply_view_event(mut state: MapViewState, event: ViewEvent) -> MapViewState {
        state.apply(event);
        state
    }

    /// Fixture tasks for prototype builds without a backend.
    #[uniffi::export]
    pub fn ffi_sample_tasks() -> Vec<Task> {
        samples::sample_tasks()
    }

    /// Static safe meeting points.
    #[uniffi::export]
    pub fn ffi_safe_meeting_points() -> Vec<SafeMeetingPoint> {
        samples::safe_meeting_points()
    }

    /// Fetch a route synchronously (blocks on an internal runtime).
    #[cfg(feature = "http")]
    #[uniffi::export]
    pub fn ffi_fetch_route(
        api_key: String,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
    ) -> Result<RoutePath, TaskMapError> {
        init_logging();
        info!(
            "[TaskMapperRust] fetch_route ({:.5},{:.5}) -> ({:.5},{:.5})",
            origin.latitude, origin.longitude, destination.latitude, destination.longitude
        );
        crate::http::fetch_route_sync(api_key, origin, destination, mode)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(37.78825, -122.4324).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            GeoPoint::new(37.78, -122.44),
            GeoPoint::new(37.79, -122.43),
            GeoPoint::new(37.785, -122.435),
        ];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds.min_lat, 37.78);
        assert_eq!(bounds.max_lat, 37.79);
        assert_eq!(bounds.min_lng, -122.44);
        assert_eq!(bounds.max_lng, -122.43);

        let center = bounds.center();
        assert!((center.latitude - 37.785).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_travel_mode_strings() {
        assert_eq!(TravelMode::Walking.as_str(), "walking");
        assert_eq!(TravelMode::Transit.as_str(), "transit");
        assert_eq!(TravelMode::default(), TravelMode::Walking);
    }

    #[test]
    fn test_task_serde_round_trip() {
        let task = Task {
            id: "t-1".to_string(),
            title: "Return library books".to_string(),
            description: "Three books, due today".to_string(),
            location: GeoPoint::new(37.78825, -122.4324),
            pay: 8.5,
            status: TaskStatus::Open,
            category: Some(TaskCategory::Errand),
            pickup: None,
            dropoff: None,
        };

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"status\":\"open\""));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_route_path_bounds() {
        let route = RoutePath {
            points: vec![
                GeoPoint::new(37.78, -122.44),
                GeoPoint::new(37.79, -122.42),
            ],
            distance_meters: 2000.0,
            duration_seconds: 1500.0,
        };
        let bounds = route.bounds().unwrap();
        assert_eq!(bounds.max_lng, -122.42);

        let empty = RoutePath {
            points: vec![],
            distance_meters: 0.0,
            duration_seconds: 0.0,
        };
        assert!(empty.bounds().is_none());
    }
}
