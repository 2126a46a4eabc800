//! Test-only packet log construction.
//!
//! The production crates are a pure decoder, so the harness builds its
//! own logs byte-by-byte. [`LogBuilder`] assembles a log in wire order
//! — prologue, header, server table, entries — and can store the
//! post-prologue remainder raw or deflate-compressed. Field overrides
//! (`raw_region_byte`, `raw_server_count`, …) exist to construct the
//! malformed logs the negative tests need.

use std::io::Write;
use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::write::DeflateEncoder;

use packlog_types::enums::{Direction, Region};
use packlog_types::timestamp::encode_timestamp;
use packlog_wire::prologue::{FORMAT_VERSION, MAGIC};
use packlog_wire::varint::encode_varint;

/// Default client protocol version used by fixtures.
pub const CLIENT_VERSION: i32 = 353701;

/// Builds a packet log as raw bytes.
///
/// Defaults: uncompressed, the supported format version, `Region::Na`,
/// client version [`CLIENT_VERSION`].
pub struct LogBuilder {
    compressed: bool,
    format_version: i32,
    region_byte: u8,
    client_version: i32,
    server_count: Option<i32>,
    servers: Vec<u8>,
    declared_servers: i32,
    entries: Vec<u8>,
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            compressed: false,
            format_version: FORMAT_VERSION,
            region_byte: Region::Na.to_wire_byte(),
            client_version: CLIENT_VERSION,
            server_count: None,
            servers: Vec::new(),
            declared_servers: 0,
            entries: Vec::new(),
        }
    }

    /// Store everything after the prologue as a deflate stream.
    #[must_use]
    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    #[must_use]
    pub fn format_version(mut self, version: i32) -> Self {
        self.format_version = version;
        self
    }

    #[must_use]
    pub fn region(mut self, region: Region) -> Self {
        self.region_byte = region.to_wire_byte();
        self
    }

    /// Write an arbitrary region byte, defined or not.
    #[must_use]
    pub fn raw_region_byte(mut self, byte: u8) -> Self {
        self.region_byte = byte;
        self
    }

    #[must_use]
    pub fn client_version(mut self, version: i32) -> Self {
        self.client_version = version;
        self
    }

    /// Force the server-count field, independent of how many server
    /// records were actually added.
    #[must_use]
    pub fn raw_server_count(mut self, count: i32) -> Self {
        self.server_count = Some(count);
        self
    }

    /// Append a server record. Both endpoints must share an address
    /// family; the record's width flag is derived from it.
    ///
    /// # Panics
    ///
    /// Panics if the endpoint families differ — that log shape is
    /// unrepresentable on the wire.
    #[must_use]
    pub fn server(mut self, id: i32, name: &str, real: SocketAddr, proxy: SocketAddr) -> Self {
        assert_eq!(
            real.is_ipv4(),
            proxy.is_ipv4(),
            "endpoints of one server share an address family"
        );

        self.servers.extend_from_slice(&id.to_le_bytes());
        push_string(&mut self.servers, name);
        self.servers.push(u8::from(!real.is_ipv4()));
        push_endpoint(&mut self.servers, real);
        push_endpoint(&mut self.servers, proxy);
        self.declared_servers += 1;
        self
    }

    /// Append an entry with a fixed default timestamp.
    #[must_use]
    pub fn entry(self, server_id: i32, direction: Direction, op_code: u16, payload: &[u8]) -> Self {
        self.entry_at(
            DateTime::UNIX_EPOCH + chrono::TimeDelta::seconds(1_700_000_000),
            server_id,
            direction,
            op_code,
            payload,
        )
    }

    /// Append an entry with an explicit timestamp.
    ///
    /// # Panics
    ///
    /// Panics if the payload exceeds the u16 length field.
    #[must_use]
    pub fn entry_at(
        mut self,
        timestamp: DateTime<Utc>,
        server_id: i32,
        direction: Direction,
        op_code: u16,
        payload: &[u8],
    ) -> Self {
        let length = u16::try_from(payload.len()).expect("payload fits the u16 length field");

        self.entries
            .extend_from_slice(&encode_timestamp(timestamp).to_le_bytes());
        self.entries.extend_from_slice(&server_id.to_le_bytes());
        self.entries.push(direction.to_wire_byte());
        self.entries.extend_from_slice(&op_code.to_le_bytes());
        self.entries.extend_from_slice(&length.to_le_bytes());
        self.entries.extend_from_slice(payload);
        self
    }

    /// Append raw bytes after the last entry, e.g. a partial record.
    #[must_use]
    pub fn trailing_bytes(mut self, bytes: &[u8]) -> Self {
        self.entries.extend_from_slice(bytes);
        self
    }

    /// Assemble the log.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&self.format_version.to_le_bytes());
        body.push(self.region_byte);
        body.extend_from_slice(&self.client_version.to_le_bytes());
        body.extend_from_slice(
            &self
                .server_count
                .unwrap_or(self.declared_servers)
                .to_le_bytes(),
        );
        body.extend_from_slice(&self.servers);
        body.extend_from_slice(&self.entries);

        let mut log = MAGIC.to_vec();
        log.push(u8::from(self.compressed));
        if self.compressed {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&body).expect("deflate into memory");
            log.extend_from_slice(&encoder.finish().expect("deflate into memory"));
        } else {
            log.extend_from_slice(&body);
        }
        log
    }
}

fn push_string(buf: &mut Vec<u8>, s: &str) {
    let mut prefix = [0u8; 5];
    let n = encode_varint(u32::try_from(s.len()).expect("name fits a u32"), &mut prefix);
    buf.extend_from_slice(&prefix[..n]);
    buf.extend_from_slice(s.as_bytes());
}

fn push_endpoint(buf: &mut Vec<u8>, addr: SocketAddr) {
    match addr.ip() {
        std::net::IpAddr::V4(ip) => buf.extend_from_slice(&ip.octets()),
        std::net::IpAddr::V6(ip) => buf.extend_from_slice(&ip.octets()),
    }
    buf.extend_from_slice(&addr.port().to_le_bytes());
}
