use std::io::{self, Read};

use flate2::read::DeflateDecoder;

/// The post-prologue byte stream, with decompression already decided.
///
/// The compressed flag in the prologue is a one-shot framing decision:
/// either the whole remainder of the log is a raw deflate stream, or
/// none of it is. `LogStream` closes that decision into a two-variant
/// sum so every downstream decoder reads through a single `Read`
/// implementation and stays agnostic to which side was taken.
///
/// ```text
///   raw source ──┬── Plain ────────────────► header, servers, entries
///                └── Deflate(inflater) ────► header, servers, entries
/// ```
///
/// The filter is installed exactly once, by the header decoder, and is
/// never reconfigured; the wrapped source is owned for the stream's
/// whole lifetime.
#[derive(Debug)]
pub enum LogStream<R: Read> {
    /// Reads pass straight through to the source.
    Plain(R),
    /// Reads inflate a deflate stream wrapped around the source.
    Deflate(DeflateDecoder<R>),
}

impl<R: Read> LogStream<R> {
    /// Wrap the source, installing the deflate filter if `compressed`.
    pub fn new(source: R, compressed: bool) -> Self {
        if compressed {
            Self::Deflate(DeflateDecoder::new(source))
        } else {
            Self::Plain(source)
        }
    }

    /// Whether the deflate filter is installed.
    pub fn is_compressed(&self) -> bool {
        matches!(self, Self::Deflate(_))
    }
}

impl<R: Read> Read for LogStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(source) => source.read(buf),
            Self::Deflate(decoder) => decoder.read(buf),
        }
    }
}
