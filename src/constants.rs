//! Constants shared by the extractor, the generator and the CLI.
//!
//! Names that appear both in the upstream manifest and in the generated chart
//! live here so the two sides cannot drift apart.

/// Env var the upstream Deployment uses for its own namespace.
///
/// The chart's Deployment template re-creates it with a downward-API
/// `fieldRef`, so the literal value is never carried over.
pub const NAMESPACE_ENV: &str = "KUBERNETES_NAMESPACE";

/// Env var holding the server image the operator deploys.
///
/// Its repository becomes `keycloakImage.repository` in `values.yaml`.
pub const KEYCLOAK_IMAGE_ENV: &str = "RELATED_IMAGE_KEYCLOAK";

/// Name of the generated chart.
pub const CHART_NAME: &str = "keycloak-operator";

/// Subdirectory for templates evaluated later by the chart runtime.
pub const TEMPLATES_DIR: &str = "templates";

/// Subdirectory receiving auxiliary definition files unmodified.
pub const CRDS_DIR: &str = "crds";

/// Default chart output directory of the CLI.
pub const DEFAULT_OUTPUT_DIR: &str = "chart";

/// Service port used when the manifest declares no Service and no container port.
pub const FALLBACK_SERVICE_PORT: u32 = 80;

/// Service type used when the manifest declares no Service.
pub const FALLBACK_SERVICE_TYPE: &str = "ClusterIP";
