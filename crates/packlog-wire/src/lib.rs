#![warn(clippy::pedantic)]

pub mod error;
pub mod primitives;
pub mod prologue;
pub mod varint;

pub use error::WireError;
pub use prologue::{FORMAT_VERSION, MAGIC, Prologue};
