use chrono::{DateTime, Utc};

use crate::enums::Direction;

/// One decoded packet record.
///
/// ```text
/// ┌────────────────────────────────────────────────────┐
/// │ PacketLogEntry                                     │
/// │   timestamp: DateTime<Utc> ← capture instant       │
/// │   server_id: i32           ← into the server table │
/// │   direction: Direction     ← who sent it           │
/// │   op_code:   u16           ← semantic packet type  │
/// │   payload:   Vec<u8>       ← opaque body bytes     │
/// └────────────────────────────────────────────────────┘
/// ```
///
/// The codec yields each entry exactly once and keeps no reference to
/// it afterwards; the consumer owns it outright. The payload is opaque
/// to this crate — interpreting it is the business of the packet-type
/// layer, which dispatches on `op_code`. Its length is bounded by the
/// u16 length field (≤ 65535 bytes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketLogEntry {
    /// When the proxy observed the packet.
    pub timestamp: DateTime<Utc>,
    /// Which declared server the packet belongs to.
    pub server_id: i32,
    /// Client-originated or server-originated.
    pub direction: Direction,
    /// Numeric packet type, meaningful only for the log's client version.
    pub op_code: u16,
    /// Raw packet body, exactly as captured.
    pub payload: Vec<u8>,
}

impl PacketLogEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        server_id: i32,
        direction: Direction,
        op_code: u16,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            timestamp,
            server_id,
            direction,
            op_code,
            payload,
        }
    }
}
