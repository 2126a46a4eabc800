#![warn(clippy::pedantic)]

pub mod fixture;

pub use fixture::LogBuilder;
