//! End-to-end scenarios over the public decoder API.
//!
//! Each test builds a log with the harness fixture, decodes it with
//! `PacketLogReader`, and checks the decoded values field by field.

use std::net::SocketAddr;

use packlog_decoder::{DecodeError, PacketLogReader};
use packlog_types::enums::{Direction, Region};
use packlog_types::tables::MessageTables;
use packlog_tests::LogBuilder;
use packlog_tests::fixture::CLIENT_VERSION;
use packlog_wire::WireError;

fn op(name: &str) -> u16 {
    MessageTables::for_version(CLIENT_VERSION)
        .unwrap()
        .game()
        .op_code_of(name)
        .unwrap_or_else(|| panic!("fixture opcode {name} should exist"))
}

fn addr(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

#[test]
fn empty_log_opens_and_yields_nothing() {
    let log = LogBuilder::new().region(Region::Eu).build();

    let mut reader = PacketLogReader::open(log.as_slice()).unwrap();
    assert!(!reader.compressed());
    assert_eq!(reader.region(), Region::Eu);
    assert_eq!(reader.client_version(), CLIENT_VERSION);
    assert!(reader.servers().is_empty());
    assert_eq!(reader.entries().count(), 0);
}

#[test]
fn unrelated_magic_fails_open() {
    let mut log = LogBuilder::new().build();
    log[..4].copy_from_slice(b"RIFF");

    let err = PacketLogReader::open(log.as_slice()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Wire(WireError::InvalidMagic { found }) if &found == b"RIFF"
    ));
    assert!(err.is_format_error());
}

#[test]
fn single_server_single_entry_decodes_exactly() {
    let log = LogBuilder::new()
        .server(1, "Login", addr("10.0.0.1:1234"), addr("127.0.0.1:9000"))
        .entry(1, Direction::ServerToClient, op("S_PING"), &[1, 2, 3])
        .build();

    let mut reader = PacketLogReader::open(log.as_slice()).unwrap();

    let server = reader.servers().get(1).unwrap();
    assert_eq!(server.id, 1);
    assert_eq!(server.name, "Login");
    assert_eq!(server.real, addr("10.0.0.1:1234"));
    assert_eq!(server.proxy, addr("127.0.0.1:9000"));

    let entry = reader.next_entry().unwrap().unwrap();
    assert_eq!(entry.server_id, 1);
    assert_eq!(entry.direction, Direction::ServerToClient);
    assert_eq!(entry.op_code, op("S_PING"));
    assert_eq!(entry.payload.len(), 3);
    assert_eq!(entry.payload, vec![1, 2, 3]);

    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn entry_for_undeclared_server_stops_the_stream() {
    let log = LogBuilder::new()
        .server(1, "Login", addr("10.0.0.1:1234"), addr("127.0.0.1:9000"))
        .entry(99, Direction::ClientToServer, op("C_PONG"), &[])
        .entry(1, Direction::ClientToServer, op("C_PONG"), &[])
        .build();

    let mut reader = PacketLogReader::open(log.as_slice()).unwrap();

    let result = reader.next_entry();
    assert!(matches!(result, Err(DecodeError::UnknownServer { id: 99 })));

    // The stream is finished; the well-formed entry behind the bad one
    // is never offered.
    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn compressed_log_decodes_identically_to_raw() {
    let build = |compressed: bool| {
        LogBuilder::new()
            .compressed(compressed)
            .server(1, "Login", addr("10.0.0.1:1234"), addr("127.0.0.1:9000"))
            .entry(1, Direction::ServerToClient, op("S_PING"), &[1, 2, 3])
            .build()
    };

    let raw_log = build(false);
    let deflated_log = build(true);
    assert_ne!(raw_log, deflated_log);

    let mut raw = PacketLogReader::open(raw_log.as_slice()).unwrap();
    let mut deflated = PacketLogReader::open(deflated_log.as_slice()).unwrap();

    assert!(!raw.compressed());
    assert!(deflated.compressed());

    // Every downstream field is identical once the filter is applied.
    assert_eq!(raw.header().region, deflated.header().region);
    assert_eq!(raw.header().client_version, deflated.header().client_version);
    assert_eq!(
        raw.servers().get(1).unwrap(),
        deflated.servers().get(1).unwrap()
    );
    assert_eq!(raw.read_all().unwrap(), deflated.read_all().unwrap());
}
