use std::io::Read;

use crate::error::WireError;
use crate::primitives::{read_i32_le, read_u8};

/// Magic number: ASCII "PKLG".
/// Stored as raw bytes rather than a u32 so byte order doesn't matter —
/// it's always these 4 bytes in this order.
pub const MAGIC: [u8; 4] = [0x50, 0x4B, 0x4C, 0x47];

/// The single log format version this build understands.
pub const FORMAT_VERSION: i32 = 1;

/// The uncompressed prologue — everything readable before the optional
/// decompression filter is installed.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 4 bytes │ Magic: "PKLG"                    │
/// │ 0x04   │ 1 byte  │ Compressed flag (0 = raw)        │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
///
/// Every byte after the flag may be deflate-compressed; the prologue
/// itself never is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prologue {
    /// Nonzero flag byte: the remainder of the log is a deflate stream.
    pub compressed: bool,
}

/// Read and validate the 5-byte prologue from the raw byte source.
///
/// # Errors
///
/// - [`WireError::InvalidMagic`] if the first 4 bytes are not `"PKLG"`.
/// - [`WireError::Io`] on a short read.
pub fn decode_prologue(r: &mut impl Read) -> Result<Prologue, WireError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;

    if magic != MAGIC {
        return Err(WireError::InvalidMagic { found: magic });
    }

    let compressed = read_u8(r)? != 0;

    Ok(Prologue { compressed })
}

/// Read the 4-byte format version and check it against
/// [`FORMAT_VERSION`].
///
/// This is the first field read through the (possibly decompressing)
/// filter, so it doubles as a sanity check that the flag byte told the
/// truth — a raw log read through an inflater fails here, not deeper in.
///
/// # Errors
///
/// - [`WireError::UnsupportedVersion`] if the version differs from the
///   one this build supports.
/// - [`WireError::Io`] on a short read.
pub fn decode_format_version(r: &mut impl Read) -> Result<i32, WireError> {
    let version = read_i32_le(r)?;

    if version != FORMAT_VERSION {
        return Err(WireError::UnsupportedVersion { found: version });
    }

    Ok(version)
}
