use std::collections::HashMap;
use std::io::Read;
use std::net::SocketAddr;

use packlog_types::server::{ServerInfo, ip_from_octets};
use packlog_wire::primitives::{read_bytes, read_i32_le, read_string, read_u8, read_u16_le};

use crate::error::DecodeError;

/// Read-only mapping from server id to [`ServerInfo`].
///
/// Built exactly once per log, immediately after the header, and never
/// mutated afterwards. Entries later reference servers by id, so the
/// table must be complete before the first entry is decoded.
#[derive(Clone, Debug, Default)]
pub struct ServerTable {
    servers: HashMap<i32, ServerInfo>,
}

impl ServerTable {
    /// Look up a server by id.
    #[must_use]
    pub fn get(&self, id: i32) -> Option<&ServerInfo> {
        self.servers.get(&id)
    }

    /// Whether the table declares the given id.
    #[must_use]
    pub fn contains(&self, id: i32) -> bool {
        self.servers.contains_key(&id)
    }

    /// Number of declared servers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Iterate all declared servers in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &ServerInfo> + '_ {
        self.servers.values()
    }
}

/// Decode the server-table section: a 4-byte count followed by that
/// many fixed-shape records.
///
/// Per record, in wire order: id, varint-prefixed name, address-width
/// flag (nonzero selects 16-byte addresses), real address + port, proxy
/// address + port. Both endpoints of one record share the selected
/// width.
///
/// # Errors
///
/// - [`DecodeError::NegativeServerCount`] before any record is read.
/// - [`DecodeError::DuplicateServerId`] if an id repeats, at any
///   position.
/// - [`TypeError::InvalidAddressLength`] (via [`DecodeError::Type`]) if
///   an address byte run cannot be interpreted.
/// - Wire-level errors for short reads and malformed strings.
///
/// [`TypeError::InvalidAddressLength`]: packlog_types::TypeError::InvalidAddressLength
pub fn decode_server_table(r: &mut impl Read) -> Result<ServerTable, DecodeError> {
    let declared = read_i32_le(r)?;
    if declared < 0 {
        return Err(DecodeError::NegativeServerCount { count: declared });
    }
    #[allow(clippy::cast_sign_loss)]
    let count = declared as usize;

    let mut servers = HashMap::with_capacity(count);

    for _ in 0..count {
        let id = read_i32_le(r)?;
        if servers.contains_key(&id) {
            return Err(DecodeError::DuplicateServerId { id });
        }

        let name = read_string(r)?;
        let width = if read_u8(r)? != 0 { 16 } else { 4 };

        let real_octets = read_bytes(r, width)?;
        let real_port = read_u16_le(r)?;
        let proxy_octets = read_bytes(r, width)?;
        let proxy_port = read_u16_le(r)?;

        let real = SocketAddr::new(ip_from_octets(&real_octets)?, real_port);
        let proxy = SocketAddr::new(ip_from_octets(&proxy_octets)?, proxy_port);

        servers.insert(id, ServerInfo::new(id, name, real, proxy));
    }

    Ok(ServerTable { servers })
}
