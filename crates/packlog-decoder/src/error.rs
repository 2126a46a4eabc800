use packlog_types::TypeError;
use packlog_wire::WireError;

/// Errors that can occur while decoding a packet log.
///
/// The decoder validates at three levels: raw framing (wrapped
/// [`WireError`]), domain-value interpretation (wrapped [`TypeError`]),
/// and the cross-referential checks that only this crate can make —
/// entries against the server table, opcodes against the resolved
/// message tables, and so on.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── UnknownClientVersion   ← no message tables for this version
///   ├── NegativeServerCount    ← server table declared a count < 0
///   ├── DuplicateServerId      ← two table records share an id
///   ├── UnknownServer          ← entry references an undeclared server
///   ├── UnknownOpCode          ← opcode absent from the opcode universe
///   ├── TruncatedRecord        ← source ended inside a record (Strict)
///   ├── Closed                 ← decode attempted after close(); usage,
///   │                            never a statement about the log bytes
///   ├── Wire(WireError)        ← magic, format version, varint, I/O
///   └── Type(TypeError)        ← enum ordinal, timestamp, address
/// ```
///
/// Clean termination is not represented here: the entry stream signals
/// it with `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The header named a client protocol version this build has no
    /// message tables for.
    ///
    /// Distinct from [`WireError::UnsupportedVersion`], which is about
    /// the log container format itself.
    #[error("unknown client protocol version {version}")]
    UnknownClientVersion { version: i32 },

    /// The server table declared a negative record count.
    #[error("negative server count {count}")]
    NegativeServerCount { count: i32 },

    /// Two server-table records carried the same id.
    #[error("duplicate server id {id} in server table")]
    DuplicateServerId { id: i32 },

    /// An entry referenced a server id the table never declared.
    #[error("entry references unknown server id {id}")]
    UnknownServer { id: i32 },

    /// An entry's opcode is not defined for the log's client version.
    #[error("opcode {op_code:#06X} is not defined for client version {client_version}")]
    UnknownOpCode { op_code: u16, client_version: i32 },

    /// The source ended after a record had started but before it was
    /// complete.
    ///
    /// Only raised under [`TruncationPolicy::Strict`]; the lenient
    /// policy folds this case into clean termination.
    ///
    /// [`TruncationPolicy::Strict`]: crate::entries::TruncationPolicy::Strict
    #[error("record truncated while reading {field}")]
    TruncatedRecord { field: &'static str },

    /// A decode operation was attempted after the reader was closed.
    ///
    /// This is a usage error, not a format error — the log bytes were
    /// never consulted.
    #[error("packet log reader is closed")]
    Closed,

    /// A framing-level error from `packlog-wire`.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A domain-value error from `packlog-types`.
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl DecodeError {
    /// Whether this error reports a structural violation of the log
    /// format.
    ///
    /// Three kinds of failure are *not* format errors: [`Closed`]
    /// (caller misuse), a format-version mismatch (the log may be
    /// perfectly valid for some other build), and transport I/O
    /// failures. Everything else means the bytes themselves are wrong.
    ///
    /// [`Closed`]: DecodeError::Closed
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        !matches!(
            self,
            Self::Closed
                | Self::Wire(WireError::UnsupportedVersion { .. })
                | Self::Wire(WireError::Io(_))
        )
    }
}
