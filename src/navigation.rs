//! Deep-link construction for handing a route to the external maps app.
//!
//! This module only builds URLs; opening them is the host app's job.
//! The single-destination form is the stable, documented contract. The
//! multi-stop form is best-effort: installed map apps differ in how many
//! `waypoints` entries they honor, so callers should treat dropped
//! intermediate stops as acceptable degradation.

use crate::{GeoPoint, TravelMode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Universal cross-platform maps URL; resolves to the native app when
/// one is installed.
const DEEP_LINK_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Characters that must not appear raw in a query value.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?')
    .add(b'|');

fn coord(p: &GeoPoint) -> String {
    format!("{},{}", p.latitude, p.longitude)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Build the navigation URL from origin to a single destination.
///
/// # Example
///
/// ```rust
/// use task_mapper::{external_route_url, GeoPoint, TravelMode};
///
/// let url = external_route_url(
///     &GeoPoint::new(37.78825, -122.4324),
///     &GeoPoint::new(37.79112, -122.42951),
///     TravelMode::Walking,
/// );
/// assert!(url.starts_with("https://www.google.com/maps/dir/?api=1"));
/// assert!(url.contains("travelmode=walking"));
/// ```
pub fn external_route_url(origin: &GeoPoint, destination: &GeoPoint, mode: TravelMode) -> String {
    format!(
        "{}&origin={}&destination={}&travelmode={}",
        DEEP_LINK_BASE,
        encode(&coord(origin)),
        encode(&coord(destination)),
        mode.as_str()
    )
}

/// Build a navigation URL with intermediate stops (best-effort).
///
/// Stops are passed as a pipe-separated `waypoints` parameter, in order.
/// With no stops this is exactly [`external_route_url`].
pub fn external_route_url_with_stops(
    origin: &GeoPoint,
    stops: &[GeoPoint],
    destination: &GeoPoint,
    mode: TravelMode,
) -> String {
    if stops.is_empty() {
        return external_route_url(origin, destination, mode);
    }

    let waypoints = stops.iter().map(coord).collect::<Vec<_>>().join("|");

    format!(
        "{}&origin={}&destination={}&waypoints={}&travelmode={}",
        DEEP_LINK_BASE,
        encode(&coord(origin)),
        encode(&coord(destination)),
        encode(&waypoints),
        mode.as_str()
    )
}
