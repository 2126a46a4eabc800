#![warn(clippy::pedantic)]

pub mod entries;
pub mod error;
pub mod header;
pub mod reader;
pub mod servers;
pub mod stream;

pub use entries::TruncationPolicy;
pub use error::DecodeError;
pub use header::LogHeader;
pub use reader::{Entries, PacketLogReader};
pub use servers::ServerTable;
pub use stream::LogStream;
