use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use packlog_types::entry::PacketLogEntry;
use packlog_types::enums::Region;
use packlog_types::tables::MessageTables;
use packlog_wire::WireError;

use crate::entries::{TruncationPolicy, decode_entry};
use crate::error::DecodeError;
use crate::header::{LogHeader, decode_header};
use crate::servers::{ServerTable, decode_server_table};
use crate::stream::LogStream;

/// Reads a captured packet log: header, server table, then entries on
/// demand.
///
/// Generic over `R: Read` so tests can decode from `&[u8]` and
/// production code from `BufReader<File>` (see
/// [`open_file`](Self::open_file)).
///
/// Construction is all-or-nothing: [`open`](Self::open) runs the header
/// and server-table decoders to completion, and any failure on the way
/// propagates from `open` itself — no partially initialized reader is
/// ever returned. The header and table are immutable afterwards;
/// entries are decoded lazily, one per [`next_entry`](Self::next_entry)
/// call, and ownership of each passes to the caller.
///
/// The reader exclusively owns the byte source and the decompression
/// filter for its whole lifetime. It moves through three states:
///
/// ```text
///   Active ──(clean end / entry error)──► Done ──(close)──► Closed
///      └───────────────(close)───────────────────────────────┘
/// ```
///
/// `Done` offers no further records; `Closed` (entered by the
/// idempotent [`close`](Self::close), or simply by dropping the reader)
/// has released the source, and any later decode attempt is
/// [`DecodeError::Closed`] — a usage error, not a statement about the
/// log. A single reader is single-threaded by construction: the entry
/// stream carries mutable position state, so parallel consumers must
/// materialize entries first ([`read_all`](Self::read_all)) or open
/// independent readers over independent sources.
#[derive(Debug)]
pub struct PacketLogReader<R: Read> {
    header: LogHeader,
    messages: MessageTables,
    servers: ServerTable,
    policy: TruncationPolicy,
    /// `None` once closed; the source and filter are dropped with it.
    stream: Option<LogStream<R>>,
    /// Set on clean termination or after an entry error has propagated.
    finished: bool,
}

impl<R: Read> PacketLogReader<R> {
    /// Open a packet log with the default (strict) truncation policy.
    ///
    /// # Errors
    ///
    /// Any header or server-table failure; see [`decode_header`] and
    /// [`decode_server_table`].
    pub fn open(source: R) -> Result<Self, DecodeError> {
        Self::with_policy(source, TruncationPolicy::default())
    }

    /// Open a packet log with an explicit truncation policy.
    ///
    /// # Errors
    ///
    /// Any header or server-table failure; see [`decode_header`] and
    /// [`decode_server_table`].
    pub fn with_policy(source: R, policy: TruncationPolicy) -> Result<Self, DecodeError> {
        let (header, mut stream, messages) = decode_header(source)?;
        let servers = decode_server_table(&mut stream)?;

        debug!(
            region = ?header.region,
            client_version = header.client_version,
            servers = servers.len(),
            "opened packet log"
        );

        Ok(Self {
            header,
            messages,
            servers,
            policy,
            stream: Some(stream),
            finished: false,
        })
    }

    /// Whether the log's remainder was deflate-compressed.
    pub fn compressed(&self) -> bool {
        self.header.compressed
    }

    /// The container format version (always the single supported one).
    pub fn format_version(&self) -> i32 {
        self.header.format_version
    }

    /// The region the capture ran in.
    pub fn region(&self) -> Region {
        self.header.region
    }

    /// The client protocol version the log was captured under.
    pub fn client_version(&self) -> i32 {
        self.header.client_version
    }

    /// The validated header as one immutable view.
    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    /// The opcode universe resolved for [`client_version`](Self::client_version).
    pub fn messages(&self) -> &MessageTables {
        &self.messages
    }

    /// The immutable id → server mapping declared by the log.
    pub fn servers(&self) -> &ServerTable {
        &self.servers
    }

    /// The truncation policy this reader was opened with.
    pub fn truncation_policy(&self) -> TruncationPolicy {
        self.policy
    }

    /// Decode the next record.
    ///
    /// Returns `Ok(Some(entry))` for each record, `Ok(None)` on clean
    /// termination and on every call thereafter. After an entry error
    /// has propagated once, the stream is finished and later calls also
    /// return `Ok(None)` — the codec never retries or resynchronizes
    /// past a malformed record.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Closed`] if [`close`](Self::close) was called.
    /// - Any entry-level decode error; see
    ///   [`decode_entry`](crate::entries::decode_entry).
    pub fn next_entry(&mut self) -> Result<Option<PacketLogEntry>, DecodeError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(DecodeError::Closed);
        };
        if self.finished {
            return Ok(None);
        }

        match decode_entry(stream, &self.servers, &self.messages, self.policy) {
            Ok(Some(entry)) => Ok(Some(entry)),
            Ok(None) => {
                self.finished = true;
                debug!("packet log stream exhausted");
                Ok(None)
            }
            Err(e) => {
                self.finished = true;
                warn!(error = %e, "entry decode failed");
                Err(e)
            }
        }
    }

    /// Iterate the remaining records.
    ///
    /// The iterator yields `Result<PacketLogEntry, DecodeError>` and
    /// fuses after clean termination or the first error.
    pub fn entries(&mut self) -> Entries<'_, R> {
        Entries {
            reader: self,
            done: false,
        }
    }

    /// Decode every remaining record into a vector.
    ///
    /// # Errors
    ///
    /// The first entry-level decode error, or [`DecodeError::Closed`].
    pub fn read_all(&mut self) -> Result<Vec<PacketLogEntry>, DecodeError> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Release the byte source and decompression filter.
    ///
    /// Idempotent: closing an already-closed reader is a no-op. The
    /// header and server-table views stay readable; only decoding is
    /// off the table afterwards. Dropping the reader without calling
    /// this releases the source just the same.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!("packet log reader closed");
        }
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }
}

impl PacketLogReader<BufReader<File>> {
    /// Open a packet log file with the default truncation policy.
    ///
    /// # Errors
    ///
    /// File-open failures surface as [`DecodeError::Wire`] I/O errors,
    /// followed by everything [`open`](Self::open) can raise.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let file = File::open(path).map_err(WireError::from)?;
        Self::open(BufReader::new(file))
    }
}

/// Forward-only iterator over a reader's remaining records.
///
/// Single-pass and not restartable: once the underlying source is
/// exhausted or an error has been yielded, the iterator is done.
pub struct Entries<'a, R: Read> {
    reader: &'a mut PacketLogReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Entries<'_, R> {
    type Item = Result<PacketLogEntry, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
