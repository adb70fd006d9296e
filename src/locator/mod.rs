//! Resource locators - the public paths of content nodes.
//!
//! # Architecture
//!
//! ```text
//!                     ┌── ContentTree  (parents, locales, draft/live segments)
//! ResourceLocatorResolver
//!   generate / save ──┼── PathStore    (current routes + history, atomic save)
//!                     ├── PathCleanup  (replacers, transliteration, validation)
//!                     └── ResourceLocatorGenerator (tree | short)
//!
//! propagate::{on_move, on_copy, on_publish} ──> resolver
//! ```
//!
//! # Module Structure
//!
//! - [`cleanup`]: locale aware cleanup and structural validation
//! - [`generator`]: candidate paths per strategy
//! - [`resolver`]: generation, persistence and lookups
//! - [`propagate`]: segment recomputation after tree mutations
//! - [`store`] / [`tree`]: storage seams with in-memory implementations

mod cleanup;
mod error;
mod generator;
mod propagate;
mod resolver;
mod store;
mod tree;

pub use cleanup::{PathCleaner, PathCleanup};
pub use error::{ResourceLocatorError, StoreError};
pub use generator::{ResourceLocatorGenerator, ShortGenerator, TreeGenerator, generator_for};
pub use propagate::{PropagationReport, on_copy, on_move, on_publish};
pub use resolver::{ResourceLocatorResolver, ResourceSegmentDocument};
pub use store::{MemoryPathStore, PathStore, RouteRecord, RouteScope};
pub use tree::{ContentNode, ContentTree, MemoryContentTree, RedirectType, TreeNode, Workspace};
