#![warn(clippy::pedantic)]

pub mod error;
pub mod header;
pub mod reader;
pub mod rfc;
pub mod streaming;
pub mod urlteam;

pub use error::{DecodeError, LineError};
pub use reader::BeaconReader;
pub use streaming::StreamingDecoder;
