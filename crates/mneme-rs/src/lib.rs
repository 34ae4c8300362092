//! Public SDK surface for Mneme.
//!
//! This crate re-exports the config and recall building blocks and provides a
//! small initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use mneme_rs_config as config;
/// Re-export for convenience.
pub use mneme_rs_memory as memory;

pub use mneme_rs_config::MnemeConfig;
pub use mneme_rs_memory::{MemoryRecall, RecallRequest};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Hosts are still expected to
/// call this early in startup to ensure recall notices are wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        if env_logger::try_init().is_ok() {
            log::debug!("logging initialized");
        }
    }
}
