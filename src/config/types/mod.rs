//! Configuration utility types.
//!
//! | Module   | Purpose                                         |
//! |----------|-------------------------------------------------|
//! | `error`  | Configuration error types                       |
//! | `field`  | Field paths for diagnostics                     |
//! | `handle` | Routing index handle with atomic rebuild        |

mod error;
mod field;
pub mod handle;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use handle::RoutingIndexHandle;
