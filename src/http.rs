//! HTTP client for the third-party directions service.
//!
//! One GET per routing action, against an external contract we do not
//! control: a JSON body with a top-level `status`, and routes carrying
//! per-leg distance/duration plus an encoded overview polyline.
//!
//! The prototype fired this request with no timeout and no retry; this
//! client pins both down:
//! - 10s request timeout
//! - exactly one retry, and only for transport-level failures
//! - non-2xx statuses, non-OK body statuses and malformed polylines are
//!   typed errors, never retried, never partially rendered

use crate::error::{Result, TaskMapError};
use crate::polyline::decode_polyline;
use crate::{GeoPoint, RoutePath, TravelMode};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES: u32 = 1;
const RETRY_DELAY: Duration = Duration::from_millis(300);

/// Wire shape of the directions response (external contract).
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
    overview_polyline: ApiPolyline,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    distance: ApiValue,
    duration: ApiValue,
}

#[derive(Debug, Deserialize)]
struct ApiValue {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ApiPolyline {
    points: String,
}

/// Client for fetching walking/cycling/driving routes.
#[derive(Debug)]
pub struct DirectionsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DirectionsClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (mock servers in tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(TaskMapError::Config {
                message: "directions API key is empty".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TaskMapError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch a route from origin to destination.
    ///
    /// Returns the decoded overview geometry with summed leg totals. Any
    /// failure - transport, HTTP status, service status, or a malformed
    /// polyline - yields an error and no route at all.
    pub async fn fetch_route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        mode: TravelMode,
    ) -> Result<RoutePath> {
        let url = format!("{}/maps/api/directions/json", self.base_url);
        let origin_param = format!("{},{}", origin.latitude, origin.longitude);
        let destination_param = format!("{},{}", destination.latitude, destination.longitude);

        let started = Instant::now();
        let mut retries = 0;

        loop {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("origin", origin_param.as_str()),
                    ("destination", destination_param.as_str()),
                    ("mode", mode.as_str()),
                    ("key", self.api_key.as_str()),
                ])
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        warn!(
                            "[Directions] HTTP {} after {:?}",
                            status,
                            started.elapsed()
                        );
                        return Err(TaskMapError::Http {
                            status_code: status.as_u16(),
                        });
                    }

                    let body: DirectionsResponse =
                        resp.json().await.map_err(|e| TaskMapError::InvalidResponse {
                            message: e.to_string(),
                        })?;

                    let route = parse_route(body)?;
                    info!(
                        "[Directions] {} points, {:.0}m, {:.0}s fetched in {:?}",
                        route.points.len(),
                        route.distance_meters,
                        route.duration_seconds,
                        started.elapsed()
                    );
                    return Ok(route);
                }
                Err(e) => {
                    retries += 1;
                    if retries > MAX_RETRIES {
                        return Err(TaskMapError::Network {
                            message: e.to_string(),
                        });
                    }
                    warn!(
                        "[Directions] request error: {}, retry {} after {:?}",
                        e, retries, RETRY_DELAY
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
}

/// Turn a decoded body into a route, or refuse it.
fn parse_route(body: DirectionsResponse) -> Result<RoutePath> {
    if body.status != "OK" {
        debug!("[Directions] service status {}", body.status);
        return Err(TaskMapError::Directions {
            status: body.status,
        });
    }

    let route = body.routes.into_iter().next().ok_or(TaskMapError::NoRoute)?;

    let distance_meters: f64 = route.legs.iter().map(|l| l.distance.value).sum();
    let duration_seconds: f64 = route.legs.iter().map(|l| l.duration.value).sum();

    // A malformed polyline aborts the whole route; partial geometry is
    // worse than no geometry
    let points = decode_polyline(&route.overview_polyline.points)?;

    Ok(RoutePath {
        points,
        distance_meters,
        duration_seconds,
    })
}

/// Synchronous wrapper for FFI - runs the async fetch on an internal runtime.
#[cfg(feature = "ffi")]
pub fn fetch_route_sync(
    api_key: String,
    origin: GeoPoint,
    destination: GeoPoint,
    mode: TravelMode,
) -> Result<RoutePath> {
    use tokio::runtime::Builder;

    let rt = Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|e| TaskMapError::Config {
            message: format!("failed to create runtime: {}", e),
        })?;

    let client = DirectionsClient::new(&api_key)?;
    rt.block_on(client.fetch_route(&origin, &destination, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn directions_body(polyline: &str) -> serde_json::Value {
        serde_json::json!({
            "status": "OK",
            "routes": [{
                "legs": [{
                    "distance": { "text": "1.2 km", "value": 1234 },
                    "duration": { "text": "15 mins", "value": 900 }
                }],
                "overview_polyline": { "points": polyline }
            }]
        })
    }

    async fn mock_client(server: &MockServer) -> DirectionsClient {
        DirectionsClient::with_base_url("test-key", &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_route_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .and(query_param("mode", "walking"))
            .and(query_param("key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(directions_body("_p~iF~ps|U_ulLnnqC")),
            )
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let route = client
            .fetch_route(
                &GeoPoint::new(38.5, -120.2),
                &GeoPoint::new(40.7, -120.95),
                TravelMode::Walking,
            )
            .await
            .unwrap();

        assert_eq!(route.points.len(), 2);
        assert_eq!(route.distance_meters, 1234.0);
        assert_eq!(route.duration_seconds, 900.0);
        assert!((route.points[0].latitude - 38.5).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_http_error_is_typed_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1) // no retry on HTTP errors
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let err = client
            .fetch_route(
                &GeoPoint::new(37.78, -122.43),
                &GeoPoint::new(37.79, -122.42),
                TravelMode::Walking,
            )
            .await
            .unwrap_err();

        assert_eq!(err, TaskMapError::Http { status_code: 500 });
    }

    #[tokio::test]
    async fn test_non_ok_service_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ZERO_RESULTS",
                "routes": []
            })))
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let err = client
            .fetch_route(
                &GeoPoint::new(37.78, -122.43),
                &GeoPoint::new(37.79, -122.42),
                TravelMode::Driving,
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TaskMapError::Directions {
                status: "ZERO_RESULTS".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_ok_status_with_no_routes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "routes": []
            })))
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let err = client
            .fetch_route(
                &GeoPoint::new(37.78, -122.43),
                &GeoPoint::new(37.79, -122.42),
                TravelMode::Walking,
            )
            .await
            .unwrap_err();

        assert_eq!(err, TaskMapError::NoRoute);
    }

    #[tokio::test]
    async fn test_malformed_polyline_refuses_route() {
        let server = MockServer::start().await;
        // Truncated mid-group: decoder must reject, client must not
        // hand back partial geometry
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(directions_body("_p~iF")))
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let err = client
            .fetch_route(
                &GeoPoint::new(37.78, -122.43),
                &GeoPoint::new(37.79, -122.42),
                TravelMode::Walking,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TaskMapError::TruncatedPolyline { .. }));
    }

    #[tokio::test]
    async fn test_network_error_after_retry() {
        // Nothing listens here; both the attempt and its single retry
        // fail at the transport level
        let client = DirectionsClient::with_base_url("test-key", "http://127.0.0.1:9").unwrap();
        let err = client
            .fetch_route(
                &GeoPoint::new(37.78, -122.43),
                &GeoPoint::new(37.79, -122.42),
                TravelMode::Walking,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TaskMapError::Network { .. }));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = DirectionsClient::new("").unwrap_err();
        assert!(matches!(err, TaskMapError::Config { .. }));
    }
}
