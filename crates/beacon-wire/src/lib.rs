#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod pushback;
pub mod text;

pub use cursor::LineCursor;
pub use error::WireError;
pub use pushback::Pushback;
