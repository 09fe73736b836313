//! Encoded polyline codec.
//!
//! Route geometry arrives as an encoded polyline string: each coordinate is
//! the delta from its predecessor, scaled by `10^precision`, zig-zag encoded
//! and written as base-64 chunks offset by 63. The directions service uses
//! precision 5 for `polyline` and precision 6 for `polyline6`.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use waypath_core::polyline;
//!
//! let coords = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5)?;
//! assert_eq!(coords.len(), 3);
//! assert_eq!(coords[0], Coord { x: -120.2, y: 38.5 });
//! # Ok::<(), polyline::PolylineError>(())
//! ```

use geo::Coord;
use thiserror::Error;

const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION: u64 = 0x20;
const ASCII_OFFSET: u8 = 63;
const MAX_SHIFT: u32 = 60;

/// Errors raised while decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// A byte outside the polyline alphabet was found.
    #[error("invalid polyline character {character:?} at byte {index}")]
    InvalidCharacter {
        /// Byte offset of the character.
        index: usize,
        /// Offending character.
        character: char,
    },
    /// The string ended in the middle of a value or after a lone latitude.
    #[error("polyline ended unexpectedly")]
    Truncated,
    /// A value needed more than 64 bits.
    #[error("polyline value starting before byte {index} overflows")]
    Overflow {
        /// Byte offset where the overflow was detected.
        index: usize,
    },
}

/// Decode an encoded polyline into coordinates (`x` longitude, `y` latitude).
///
/// # Errors
///
/// Returns [`PolylineError`] when the input contains characters outside the
/// polyline alphabet, ends mid-coordinate, or encodes an oversized value.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Coord<f64>>, PolylineError> {
    let factor = scale_factor(precision);
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut coords = Vec::new();

    while index < bytes.len() {
        let (lat_delta, after_lat) = read_value(bytes, index)?;
        let (lon_delta, after_lon) = read_value(bytes, after_lat)?;
        index = after_lon;
        latitude = latitude.wrapping_add(lat_delta);
        longitude = longitude.wrapping_add(lon_delta);
        coords.push(Coord {
            x: unscale(longitude, factor),
            y: unscale(latitude, factor),
        });
    }

    Ok(coords)
}

/// Encode coordinates (`x` longitude, `y` latitude) as a polyline string.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypath_core::polyline;
///
/// let encoded = polyline::encode(&[Coord { x: -120.2, y: 38.5 }], 5);
/// assert_eq!(encoded, "_p~iF~ps|U");
/// ```
#[must_use]
pub fn encode(coords: &[Coord<f64>], precision: u32) -> String {
    let factor = scale_factor(precision);
    let mut encoded = String::new();
    let mut previous_lat: i64 = 0;
    let mut previous_lon: i64 = 0;

    for coord in coords {
        let latitude = scale(coord.y, factor);
        let longitude = scale(coord.x, factor);
        write_value(&mut encoded, latitude.wrapping_sub(previous_lat));
        write_value(&mut encoded, longitude.wrapping_sub(previous_lon));
        previous_lat = latitude;
        previous_lon = longitude;
    }

    encoded
}

fn scale_factor(precision: u32) -> f64 {
    10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "polyline values are fixed-point integers scaled by a power of ten"
)]
fn unscale(value: i64, factor: f64) -> f64 {
    value as f64 / factor
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "coordinates are rounded to the polyline's fixed-point precision"
)]
fn scale(value: f64, factor: f64) -> i64 {
    (value * factor).round() as i64
}

/// Read one zig-zag encoded value starting at `start`.
///
/// Returns the decoded value and the index of the next unread byte.
fn read_value(bytes: &[u8], start: usize) -> Result<(i64, usize), PolylineError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    let mut index = start;

    loop {
        let byte = *bytes.get(index).ok_or(PolylineError::Truncated)?;
        let chunk = byte
            .checked_sub(ASCII_OFFSET)
            .filter(|chunk| *chunk < 64)
            .ok_or(PolylineError::InvalidCharacter {
                index,
                character: char::from(byte),
            })?;
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { index });
        }
        let chunk = u64::from(chunk);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        index += 1;
        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    Ok((zigzag_decode(result), index))
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "zig-zag decoding reinterprets the shifted bits as signed"
)]
const fn zigzag_decode(value: u64) -> i64 {
    let magnitude = (value >> 1) as i64;
    if value & 1 == 1 { !magnitude } else { magnitude }
}

#[expect(
    clippy::cast_sign_loss,
    reason = "zig-zag encoding reinterprets the signed bits as unsigned"
)]
const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn write_value(out: &mut String, value: i64) {
    let mut remaining = zigzag_encode(value);
    while remaining >= CONTINUATION {
        push_chunk(out, (remaining & CHUNK_MASK) | CONTINUATION);
        remaining >>= CHUNK_BITS;
    }
    push_chunk(out, remaining);
}

fn push_chunk(out: &mut String, chunk: u64) {
    // Chunks are at most six bits wide, so the offset stays within ASCII.
    let byte = u8::try_from(chunk).map_or(u8::MAX, |value| value + ASCII_OFFSET);
    out.push(char::from(byte));
}
