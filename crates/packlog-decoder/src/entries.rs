use std::io::{self, Read};

use packlog_types::entry::PacketLogEntry;
use packlog_types::enums::Direction;
use packlog_types::tables::MessageTables;
use packlog_types::timestamp::decode_timestamp;
use packlog_wire::WireError;
use packlog_wire::primitives::{read_bytes, read_i32_le, read_u8, read_u16_le};

use crate::error::DecodeError;
use crate::servers::ServerTable;

/// What to do when the source ends inside a record.
///
/// Exhaustion at a record boundary is always clean termination. The
/// policy only governs the other case: some bytes of a record were
/// read and then the source ran dry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Surface mid-record truncation as
    /// [`DecodeError::TruncatedRecord`].
    #[default]
    Strict,
    /// Fold mid-record truncation into clean termination, as the
    /// capture tooling this format comes from historically did. A
    /// corrupt trailing record is indistinguishable from a shorter log
    /// under this policy.
    TreatAsEof,
}

/// Decode the next packet record from the stream.
///
/// Field order: timestamp (8 bytes), server id (4), direction (1),
/// opcode (2), payload length (2), payload (exactly that many bytes,
/// read as one unit).
///
/// Returns `Ok(None)` for clean termination: the source was exhausted
/// before the first byte of a new record. A short read anywhere later
/// in the record is mid-record truncation, dispatched per `policy`.
///
/// # Errors
///
/// - [`TypeError::InvalidTimestamp`] / [`TypeError::InvalidEnumValue`]
///   (via [`DecodeError::Type`]) for unrepresentable timestamps and
///   undefined direction ordinals.
/// - [`DecodeError::UnknownServer`] when the server id is not in the
///   table.
/// - [`DecodeError::UnknownOpCode`] when the opcode is not in the
///   resolved opcode universe.
/// - [`DecodeError::TruncatedRecord`] under [`TruncationPolicy::Strict`].
///
/// [`TypeError::InvalidTimestamp`]: packlog_types::TypeError::InvalidTimestamp
/// [`TypeError::InvalidEnumValue`]: packlog_types::TypeError::InvalidEnumValue
pub fn decode_entry(
    r: &mut impl Read,
    servers: &ServerTable,
    messages: &MessageTables,
    policy: TruncationPolicy,
) -> Result<Option<PacketLogEntry>, DecodeError> {
    let Some(raw_timestamp) = read_timestamp_lead(r, policy)? else {
        return Ok(None);
    };
    let timestamp = decode_timestamp(raw_timestamp)?;

    let Some(server_id) = body_field(read_i32_le(r), "server id", policy)? else {
        return Ok(None);
    };
    if !servers.contains(server_id) {
        return Err(DecodeError::UnknownServer { id: server_id });
    }

    let Some(direction_byte) = body_field(read_u8(r), "direction", policy)? else {
        return Ok(None);
    };
    let direction = Direction::from_wire_byte(direction_byte)?;

    let Some(op_code) = body_field(read_u16_le(r), "opcode", policy)? else {
        return Ok(None);
    };
    if !messages.game().contains_op_code(op_code) {
        return Err(DecodeError::UnknownOpCode {
            op_code,
            client_version: messages.client_version(),
        });
    }

    let Some(length) = body_field(read_u16_le(r), "payload length", policy)? else {
        return Ok(None);
    };
    let Some(payload) = body_field(read_bytes(r, usize::from(length)), "payload", policy)? else {
        return Ok(None);
    };

    Ok(Some(PacketLogEntry::new(
        timestamp, server_id, direction, op_code, payload,
    )))
}

/// Read the 8-byte timestamp that leads every record, byte-at-a-time so
/// the two exhaustion cases stay distinguishable.
///
/// Zero bytes available is clean termination (`Ok(None)`); one to seven
/// bytes is mid-record truncation, dispatched per `policy`.
fn read_timestamp_lead(
    r: &mut impl Read,
    policy: TruncationPolicy,
) -> Result<Option<i64>, DecodeError> {
    let mut buf = [0u8; 8];
    let mut filled = 0;

    while filled < 8 {
        match r.read(&mut buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    // Clean end of data — no more records.
                    return Ok(None);
                }
                return truncated("timestamp", policy).map(|()| None);
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(WireError::from(e).into()),
        }
    }

    Ok(Some(i64::from_le_bytes(buf)))
}

/// Map a post-lead field read: a short read becomes the policy's
/// truncation disposition, everything else passes through.
fn body_field<T>(
    result: Result<T, WireError>,
    field: &'static str,
    policy: TruncationPolicy,
) -> Result<Option<T>, DecodeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(WireError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
            truncated(field, policy).map(|()| None)
        }
        Err(e) => Err(e.into()),
    }
}

fn truncated(field: &'static str, policy: TruncationPolicy) -> Result<(), DecodeError> {
    match policy {
        TruncationPolicy::Strict => Err(DecodeError::TruncatedRecord { field }),
        TruncationPolicy::TreatAsEof => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packlog_types::TypeError;
    use packlog_wire::varint::encode_varint;

    const CLIENT_VERSION: i32 = 353701;

    fn tables() -> MessageTables {
        MessageTables::for_version(CLIENT_VERSION).unwrap()
    }

    fn one_server_table() -> ServerTable {
        let mut buf = 1i32.to_le_bytes().to_vec();
        buf.extend_from_slice(&1i32.to_le_bytes());
        let mut prefix = [0u8; 5];
        let n = encode_varint(5, &mut prefix);
        buf.extend_from_slice(&prefix[..n]);
        buf.extend_from_slice(b"Login");
        buf.push(0);
        buf.extend_from_slice(&[10, 0, 0, 1]);
        buf.extend_from_slice(&1234u16.to_le_bytes());
        buf.extend_from_slice(&[127, 0, 0, 1]);
        buf.extend_from_slice(&9000u16.to_le_bytes());
        crate::servers::decode_server_table(&mut buf.as_slice()).unwrap()
    }

    fn raw_entry(server_id: i32, direction: u8, op_code: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = 1_700_000_000_000_000i64.to_le_bytes().to_vec();
        buf.extend_from_slice(&server_id.to_le_bytes());
        buf.push(direction);
        buf.extend_from_slice(&op_code.to_le_bytes());
        buf.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    fn known_op() -> u16 {
        tables().game().op_code_of("S_CHAT").unwrap()
    }

    #[test]
    fn decodes_entry_fields_exactly() {
        let buf = raw_entry(1, 0x01, known_op(), &[0xDE, 0xAD, 0xBE]);
        let entry = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::Strict,
        )
        .unwrap()
        .unwrap();

        assert_eq!(entry.server_id, 1);
        assert_eq!(entry.direction, Direction::ServerToClient);
        assert_eq!(entry.op_code, known_op());
        assert_eq!(entry.payload, vec![0xDE, 0xAD, 0xBE]);
        assert_eq!(
            packlog_types::timestamp::encode_timestamp(entry.timestamp),
            1_700_000_000_000_000
        );
    }

    #[test]
    fn exhaustion_at_record_boundary_is_clean() {
        for policy in [TruncationPolicy::Strict, TruncationPolicy::TreatAsEof] {
            let mut empty: &[u8] = &[];
            let result = decode_entry(&mut empty, &one_server_table(), &tables(), policy).unwrap();
            assert!(result.is_none());
        }
    }

    #[test]
    fn partial_timestamp_honors_policy() {
        for partial_len in 1..=7 {
            let buf = vec![0xAAu8; partial_len];

            let strict = decode_entry(
                &mut buf.as_slice(),
                &one_server_table(),
                &tables(),
                TruncationPolicy::Strict,
            );
            assert!(
                matches!(
                    strict,
                    Err(DecodeError::TruncatedRecord { field: "timestamp" })
                ),
                "expected truncation error for {partial_len}-byte lead"
            );

            let lenient = decode_entry(
                &mut buf.as_slice(),
                &one_server_table(),
                &tables(),
                TruncationPolicy::TreatAsEof,
            )
            .unwrap();
            assert!(lenient.is_none());
        }
    }

    #[test]
    fn truncated_payload_honors_policy() {
        let mut buf = raw_entry(1, 0x00, known_op(), &[1, 2, 3, 4, 5]);
        buf.truncate(buf.len() - 2);

        let strict = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::Strict,
        );
        assert!(matches!(
            strict,
            Err(DecodeError::TruncatedRecord { field: "payload" })
        ));

        let lenient = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::TreatAsEof,
        )
        .unwrap();
        assert!(lenient.is_none());
    }

    #[test]
    fn unrepresentable_timestamp_is_rejected() {
        let mut buf = raw_entry(1, 0x00, known_op(), &[]);
        buf[..8].copy_from_slice(&i64::MAX.to_le_bytes());

        let result = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::Strict,
        );
        assert!(matches!(
            result,
            Err(DecodeError::Type(TypeError::InvalidTimestamp { raw: i64::MAX }))
        ));
    }

    #[test]
    fn unknown_server_is_rejected() {
        let buf = raw_entry(99, 0x00, known_op(), &[]);
        let result = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::Strict,
        );
        assert!(matches!(result, Err(DecodeError::UnknownServer { id: 99 })));
    }

    #[test]
    fn undefined_direction_is_rejected() {
        let buf = raw_entry(1, 0x07, known_op(), &[]);
        let result = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::Strict,
        );
        assert!(matches!(
            result,
            Err(DecodeError::Type(TypeError::InvalidEnumValue {
                enum_name: "Direction",
                value: 0x07,
            }))
        ));
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        let buf = raw_entry(1, 0x00, 0x0001, &[]);
        let result = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::Strict,
        );
        assert!(matches!(
            result,
            Err(DecodeError::UnknownOpCode {
                op_code: 0x0001,
                client_version: CLIENT_VERSION,
            })
        ));
    }

    #[test]
    fn empty_payload_is_valid() {
        let buf = raw_entry(1, 0x01, known_op(), &[]);
        let entry = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::Strict,
        )
        .unwrap()
        .unwrap();
        assert!(entry.payload.is_empty());
    }

    #[test]
    fn validation_errors_ignore_truncation_policy() {
        // The lenient policy only swallows short reads, never
        // structural violations.
        let buf = raw_entry(99, 0x00, known_op(), &[]);
        let result = decode_entry(
            &mut buf.as_slice(),
            &one_server_table(),
            &tables(),
            TruncationPolicy::TreatAsEof,
        );
        assert!(matches!(result, Err(DecodeError::UnknownServer { id: 99 })));
    }
}
