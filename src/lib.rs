//! Webspace routing - multi-tenant URL routing index and resource locator
//! resolution for hierarchical content trees.
//!
//! # Module Structure
//!
//! - [`config`]: `routing.toml` / JSON loading, validation, index handle
//! - [`webspace`]: compiled webspace, portal and localization model
//! - [`index`]: routing index builder and request resolution
//! - [`locator`]: resource locator generation, storage and propagation
//! - [`logger`]: `log!` / `debug!` macros with colored module prefixes

pub mod config;
pub mod index;
pub mod locator;
pub mod logger;
pub mod utils;
pub mod webspace;
