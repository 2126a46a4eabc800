use std::net::{IpAddr, SocketAddr};

use crate::error::TypeError;

/// Recorded identity of one proxied server.
///
/// A log declares every server it references up front, before any
/// entries. Each declaration carries the server's real endpoint (where
/// the game client would normally connect) and the proxy endpoint the
/// recording session substituted for it. Both endpoints of one server
/// always share an address family.
///
/// Instances are built only by the server-table decoder and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerInfo {
    /// Stable numeric id, unique within one log.
    pub id: i32,
    /// Display name, e.g. `"Arborea"`.
    pub name: String,
    /// The server's real endpoint.
    pub real: SocketAddr,
    /// The proxy endpoint that stood in for it during capture.
    pub proxy: SocketAddr,
}

impl ServerInfo {
    pub fn new(id: i32, name: String, real: SocketAddr, proxy: SocketAddr) -> Self {
        Self {
            id,
            name,
            real,
            proxy,
        }
    }
}

/// Interpret a raw byte run as an IP address.
///
/// Exactly 4 bytes decode as IPv4 and exactly 16 as IPv6; the log's
/// address-width flag guarantees one of the two, so any other length
/// means the byte run was assembled wrong.
///
/// # Errors
///
/// Returns [`TypeError::InvalidAddressLength`] for any other length.
pub fn ip_from_octets(octets: &[u8]) -> Result<IpAddr, TypeError> {
    if let Ok(v4) = <[u8; 4]>::try_from(octets) {
        return Ok(IpAddr::from(v4));
    }
    if let Ok(v6) = <[u8; 16]>::try_from(octets) {
        return Ok(IpAddr::from(v6));
    }
    Err(TypeError::InvalidAddressLength { len: octets.len() })
}
