//! Environment configuration for runbook.
//!
//! Every setting is read from a process environment variable and falls back
//! to a built-in default. An empty value counts as unset. Where each value came
//! from is recorded so it can be logged (with secrets masked) and so callers can
//! tell an explicit setting from a default.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{ConfigItem, ConfigSource, ITEMS, ItemKind, ItemSpec, SECRET_MASK};
