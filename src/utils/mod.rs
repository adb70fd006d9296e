//! Small shared helpers.
//!
//! - [`hash`]: content hashing for configuration change detection
//! - [`plural`]: pluralization for log output

pub mod hash;
mod plural;

pub use plural::{plural_count, plural_s};
