//! Test utilities for kube-chartgen
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests:
//! - [`ManifestFixture`] builds upstream manifests document by document
//! - [`init_test_logging`] routes `tracing` output to the test harness
//!
//! # Example
//!
//! ```rust,no_run
//! use kube_chartgen::test_utils::ManifestFixture;
//!
//! let yaml = ManifestFixture::minimal()
//!     .with_role_binding("keycloak-operator-view", "ClusterRole", "view")
//!     .to_yaml();
//! let model = kube_chartgen::extract::extract(yaml.as_bytes()).unwrap();
//! assert!(model.rbac.role_bindings[0].is_builtin_role);
//! ```

pub mod fixtures;

pub use fixtures::ManifestFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=kube_chartgen=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
