//! Encoded-polyline codec for directions-service route geometry.
//!
//! The format packs signed coordinate deltas as zig-zag integers split
//! into 5-bit groups, each byte offset by 63 with bit 0x20 (pre-offset)
//! marking continuation. Coordinates are scaled by 1e5 and encoded as
//! deltas from the previous point, starting from (0, 0).
//!
//! Unlike the usual copy-paste decoders, this one refuses malformed
//! input: a stream that ends in the middle of a coordinate group is a
//! [`TaskMapError::TruncatedPolyline`], not a garbage tail coordinate.

use crate::error::{Result, TaskMapError};
use crate::GeoPoint;

/// Byte offset applied to every encoded 5-bit group.
const ENCODING_OFFSET: u8 = 63;
/// Continuation marker on the pre-offset group value.
const CONTINUATION_BIT: u64 = 0x20;
/// Coordinate scale factor.
const PRECISION: f64 = 1e5;
/// A valid coordinate needs at most 7 groups; far more means the stream
/// is not a polyline at all.
const MAX_GROUPS_PER_VALUE: u32 = 12;

/// Decode an encoded polyline into coordinates, in encoding order.
///
/// The empty string decodes to an empty sequence. Any malformed input
/// (truncation mid-group, bytes outside the encodable range, deltas that
/// accumulate past valid latitude/longitude) produces an error and no
/// partial output.
///
/// # Example
///
/// ```rust
/// use task_mapper::decode_polyline;
///
/// let points = decode_polyline("_p~iF~ps|U_ulLnnqC").unwrap();
/// assert_eq!(points.len(), 2);
/// assert!((points[0].latitude - 38.5).abs() < 1e-5);
/// assert!((points[1].longitude - -120.95).abs() < 1e-5);
/// ```
pub fn decode_polyline(encoded: &str) -> Result<Vec<GeoPoint>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0usize;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += read_delta(bytes, &mut index)?;
        lng += read_delta(bytes, &mut index)?;

        let latitude = lat as f64 / PRECISION;
        let longitude = lng as f64 / PRECISION;
        let point = GeoPoint::new(latitude, longitude);
        if !point.is_valid() {
            return Err(TaskMapError::CoordinateOutOfRange {
                latitude,
                longitude,
            });
        }
        points.push(point);
    }

    Ok(points)
}

/// Encode coordinates into the polyline format.
///
/// Inverse of [`decode_polyline`] up to the 1e-5 quantization step.
pub fn encode_polyline(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for p in points {
        let lat = (p.latitude * PRECISION).round() as i64;
        let lng = (p.longitude * PRECISION).round() as i64;
        write_delta(lat - prev_lat, &mut out);
        write_delta(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Read one zig-zag varint group sequence starting at `*index`.
fn read_delta(bytes: &[u8], index: &mut usize) -> Result<i64> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    let mut groups: u32 = 0;

    loop {
        if *index >= bytes.len() {
            return Err(TaskMapError::TruncatedPolyline { position: *index });
        }

        let byte = bytes[*index];
        // 63 + 0x3f is the largest encodable group byte
        if !(ENCODING_OFFSET..=ENCODING_OFFSET + 0x3f).contains(&byte) {
            return Err(TaskMapError::InvalidPolylineByte {
                byte,
                position: *index,
            });
        }

        let group = (byte - ENCODING_OFFSET) as u64;
        result |= (group & 0x1f) << shift;
        shift += 5;
        groups += 1;
        *index += 1;

        if group & CONTINUATION_BIT == 0 {
            break;
        }
        if groups >= MAX_GROUPS_PER_VALUE {
            return Err(TaskMapError::InvalidPolylineByte {
                byte,
                position: *index - 1,
            });
        }
    }

    // Undo the zig-zag sign fold
    let value = if result & 1 != 0 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };

    Ok(value)
}

/// Append one delta as zig-zag varint groups.
fn write_delta(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

    while value >= CONTINUATION_BIT {
        let group = (value & 0x1f) | CONTINUATION_BIT;
        out.push((group as u8 + ENCODING_OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + ENCODING_OFFSET) as char);
}
