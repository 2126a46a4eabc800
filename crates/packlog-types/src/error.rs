/// Errors that can occur when interpreting decoded wire values as
/// domain types.
///
/// These are higher-level than `packlog_wire::WireError` — they deal
/// with semantic validation of already-read bytes rather than raw
/// framing. Every variant is a structural violation of the log format:
/// a value was read successfully but lies outside its closed domain.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// An enum field contained a byte value outside its defined range.
    ///
    /// For example, a `Direction` byte of `0x05` when the only defined
    /// ordinals are 0 and 1. The enum name and raw value are captured
    /// for diagnostics.
    #[error("invalid {enum_name} value: {value:#04X}")]
    InvalidEnumValue { enum_name: &'static str, value: u8 },

    /// A timestamp field decoded to a microsecond count outside the
    /// representable date range.
    ///
    /// Distinct from a short read: all 8 bytes were present, but the
    /// value they encode cannot name a point in time.
    #[error("timestamp {raw} is outside the representable range")]
    InvalidTimestamp { raw: i64 },

    /// An address byte run was neither 4 (IPv4) nor 16 (IPv6) bytes.
    #[error("invalid address length: {len} bytes (expected 4 or 16)")]
    InvalidAddressLength { len: usize },
}
