//! Command-line interface module.

mod args;
pub mod check;
pub mod cleanup;
pub mod index;
pub mod resolve;

pub use args::{Cli, Commands, IndexArgs};
