//! Wire encoding of entry timestamps.
//!
//! An entry's timestamp is a signed 64-bit count of microseconds since
//! the Unix epoch. Not every `i64` names a point in time — values past
//! roughly ±262,000 years fall outside the representable date range —
//! so decoding is fallible, and that failure is distinct from a short
//! read: all 8 bytes were present, they just encode nothing.

use chrono::{DateTime, Utc};

use crate::error::TypeError;

/// Decode a raw microsecond count into an absolute point in time.
///
/// # Errors
///
/// Returns [`TypeError::InvalidTimestamp`] when the count is outside
/// the representable range.
pub fn decode_timestamp(raw: i64) -> Result<DateTime<Utc>, TypeError> {
    DateTime::from_timestamp_micros(raw).ok_or(TypeError::InvalidTimestamp { raw })
}

/// Encode an absolute point in time as the wire microsecond count.
///
/// Sub-microsecond precision is discarded. This is the exact inverse of
/// [`decode_timestamp`] for any value that round-trips.
pub fn encode_timestamp(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_micros()
}
