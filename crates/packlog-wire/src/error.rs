/// Errors raised by the byte-level reading primitives.
///
/// These deal with raw framing only: the magic prologue, the format
/// version, varint termination, and string decoding. Semantic
/// validation (enum ordinals, timestamps, cross-references) lives in
/// the `packlog-types` and `packlog-decoder` error types, which wrap
/// this one.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The log did not start with the `b"PKLG"` magic bytes.
    #[error("invalid magic bytes: expected \"PKLG\", got {found:02X?}")]
    InvalidMagic { found: [u8; 4] },

    /// The format version field did not match the single version this
    /// build understands.
    #[error("unsupported log format version {found}")]
    UnsupportedVersion { found: i32 },

    /// Varint encoding exceeded the 5-byte limit for a u32 value.
    #[error("varint too long: exceeded 5-byte limit")]
    VarintTooLong,

    /// A length-prefixed string contained non-UTF-8 bytes.
    #[error("invalid UTF-8 in length-prefixed string")]
    InvalidUtf8,

    /// I/O error from the underlying byte source.
    ///
    /// `io::ErrorKind::UnexpectedEof` is the short-read signal; callers
    /// that need to distinguish clean end-of-data from truncation probe
    /// the first field of a record themselves.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
