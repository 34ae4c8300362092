//! Configuration models and layered config loading.
//!
//! This crate owns the Mneme config schema, validation, and layer-merging
//! logic. The recall pipeline only ever reads the `memory.auto_recall`
//! section (optionally overridden per agent).

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Layered config types and loader options.
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
/// Configuration schema models.
pub use model::*;
