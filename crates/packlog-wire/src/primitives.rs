//! Fixed-width little-endian reads over a blocking byte source.
//!
//! Every multi-byte integer in the log format is little-endian. Each
//! helper reads exactly one field and nothing more; the decoder never
//! buffers ahead of the field it is currently parsing.

use std::io::Read;

use crate::error::WireError;
use crate::varint::read_varint;

/// Read a single byte.
pub fn read_u8(r: &mut impl Read) -> Result<u8, WireError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u16.
pub fn read_u16_le(r: &mut impl Read) -> Result<u16, WireError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut impl Read) -> Result<i32, WireError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a little-endian i64.
pub fn read_i64_le(r: &mut impl Read) -> Result<i64, WireError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

/// Read exactly `len` bytes as one unit.
pub fn read_bytes(r: &mut impl Read, len: usize) -> Result<Vec<u8>, WireError> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read a varint-length-prefixed UTF-8 string.
///
/// # Errors
///
/// - [`WireError::InvalidUtf8`] if the bytes are not valid UTF-8.
/// - [`WireError::VarintTooLong`] / [`WireError::Io`] from the length
///   prefix or the string bytes.
pub fn read_string(r: &mut impl Read) -> Result<String, WireError> {
    let len = read_varint(r)? as usize;
    let buf = read_bytes(r, len)?;
    String::from_utf8(buf).map_err(|_| WireError::InvalidUtf8)
}
