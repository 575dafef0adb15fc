#![warn(clippy::pedantic)]

pub mod dialect;
pub mod link;
pub mod meta;

pub use dialect::Dialect;
pub use link::Link;
pub use meta::MetaField;
