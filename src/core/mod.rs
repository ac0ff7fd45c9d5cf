//! Core infrastructure module for iris-subset.
//!
//! - [`types`]: label and feature value types
//! - [`constants`]: defaults shared across the crate
//! - [`error`]: the crate error type and `Result` alias

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{Result, SubsetError};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static CORE_INIT: Once = Once::new();
static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging for the process.
///
/// `RUST_LOG` defaults to `info` when unset. Calling this more than once is a
/// no-op, and an `env_logger` already installed by the host is left in place.
pub fn initialize_core() -> Result<()> {
    CORE_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "info");
        }
        let _ = env_logger::try_init();

        CORE_INITIALIZED.store(true, Ordering::SeqCst);
        log::debug!("iris-subset {} initialized", IRIS_SUBSET_VERSION);
    });

    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_initialization() {
        assert!(initialize_core().is_ok());
        assert!(is_core_initialized());

        // Second call must not fail or reinstall the logger
        assert!(initialize_core().is_ok());
    }

    #[test]
    fn test_version_constants() {
        assert!(!IRIS_SUBSET_VERSION.is_empty());
        assert_eq!(DEFAULT_QUOTA, 30);
        assert_eq!(IRIS_NUM_CLASSES, 3);
    }
}
