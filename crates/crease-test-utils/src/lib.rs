//! Test utilities for crease integration testing

pub mod fixtures;
pub mod store;

pub use fixtures::{sample_state, sample_state_mid_over};
pub use store::{FlakyStore, MemoryStore};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    EnvFilter::new("crease_sync=debug,crease_remote=debug")
                }),
            )
            .with_test_writer()
            .init();
    });
}
