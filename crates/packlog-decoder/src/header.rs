use std::io::Read;

use tracing::debug;

use packlog_types::enums::Region;
use packlog_types::tables::MessageTables;
use packlog_wire::primitives::{read_i32_le, read_u8};
use packlog_wire::prologue::{decode_format_version, decode_prologue};

use crate::error::DecodeError;
use crate::stream::LogStream;

/// The validated log header — everything known about a log before its
/// server table.
///
/// ```text
/// ┌───────────────────────────────────────────────────────┐
/// │ LogHeader                                             │
/// │   compressed:     bool   ← deflate filter installed   │
/// │   format_version: i32    ← container format (always 1)│
/// │   region:         Region ← where the capture ran      │
/// │   client_version: i32    ← keys the opcode universe   │
/// └───────────────────────────────────────────────────────┘
/// ```
///
/// Immutable for the lifetime of the reader that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogHeader {
    pub compressed: bool,
    pub format_version: i32,
    pub region: Region,
    pub client_version: i32,
}

/// Decode and validate the log header, consuming the prologue and the
/// post-filter header fields.
///
/// Steps, in wire order:
///
///   1. Magic bytes — mismatch fails before any other field is read.
///   2. Compressed flag — nonzero installs the deflate filter; every
///      subsequent read (including the rest of this function) goes
///      through [`LogStream`] and is agnostic to the decision.
///   3. Format version — must equal the single supported version.
///   4. Region — parsed into the closed [`Region`] enum.
///   5. Client protocol version — must resolve to message tables; the
///      resolution itself cannot fail once the version is known.
///
/// On success the caller receives the header view, the positioned
/// stream, and the resolved opcode universe. On any failure nothing
/// escapes — there is no partially valid header.
///
/// # Errors
///
/// - [`WireError::InvalidMagic`] / [`WireError::UnsupportedVersion`]
///   (via [`DecodeError::Wire`]) for prologue and version failures.
/// - [`TypeError::InvalidEnumValue`] (via [`DecodeError::Type`]) for an
///   undefined region ordinal.
/// - [`DecodeError::UnknownClientVersion`] when no message tables exist
///   for the recorded client version.
///
/// [`WireError::InvalidMagic`]: packlog_wire::WireError::InvalidMagic
/// [`WireError::UnsupportedVersion`]: packlog_wire::WireError::UnsupportedVersion
/// [`TypeError::InvalidEnumValue`]: packlog_types::TypeError::InvalidEnumValue
pub fn decode_header<R: Read>(
    mut source: R,
) -> Result<(LogHeader, LogStream<R>, MessageTables), DecodeError> {
    let prologue = decode_prologue(&mut source)?;

    let mut stream = LogStream::new(source, prologue.compressed);

    let format_version = decode_format_version(&mut stream)?;
    let region = Region::from_wire_byte(read_u8(&mut stream)?)?;
    let client_version = read_i32_le(&mut stream)?;

    let messages = MessageTables::for_version(client_version).ok_or(
        DecodeError::UnknownClientVersion {
            version: client_version,
        },
    )?;

    let header = LogHeader {
        compressed: prologue.compressed,
        format_version,
        region,
        client_version,
    };

    debug!(
        compressed = header.compressed,
        region = ?header.region,
        client_version = header.client_version,
        "decoded packet log header"
    );

    Ok((header, stream, messages))
}
