//! kube-chartgen - Helm chart generator for the Keycloak operator
//!
//! Converts the vendor-supplied, multi-document Kubernetes manifest of the
//! Keycloak operator (Deployment, Service, ClusterRoles, Roles and their
//! bindings) into an installable Helm chart: `Chart.yaml`, `values.yaml` and
//! a set of templated resources, with every managed RBAC name rewritten
//! consistently and references to builtin roles left untouched.
//!
//! # Architecture Overview
//!
//! ```text
//! manifest bytes ──► extract ──► ChartModel ──► chart::generate ──► chart directory
//! ```
//!
//! The normalized [`models::ChartModel`] is the only contract between the two
//! halves: the extractor never touches the filesystem and the generator never
//! interprets resource semantics.
//!
//! # Core Modules
//!
//! - [`manifest`] - multi-document decoding, [`manifest::ResourceKind`], typed field access
//! - [`extract`] - image splitting, suffix derivation, roles-then-bindings resolution
//! - [`models`] - the normalized model, serialized as the render context
//! - [`templating`] - Tera renderer with generator delimiters and Helm passthrough
//! - [`chart`] - output file table, static assets, auxiliary definition copy
//! - [`core`] - [`core::ChartError`] and user-facing error display
//! - [`cli`] - clap surface and logging setup for the `chartgen` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! let manifest = std::fs::read("kubernetes.yml")?;
//! let crds = vec![PathBuf::from("keycloaks.k8s.keycloak.org-v1.yml")];
//! let summary = kube_chartgen::extract_and_generate(&manifest, Path::new("chart"), &crds)?;
//! println!("{summary}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chart;
pub mod cli;
pub mod constants;
pub mod core;
pub mod extract;
pub mod manifest;
pub mod models;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::CHART_NAME;
use crate::core::ChartError;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub app_version: String,
    pub output_root: PathBuf,
    /// Rendered chart files, in write order
    pub files: Vec<PathBuf>,
    /// Number of auxiliary definitions copied into `crds/`
    pub crds_copied: usize,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated Helm chart for {CHART_NAME} {} in {}",
            self.app_version,
            self.output_root.display()
        )
    }
}

/// Extract the model from `manifest` and write the chart under `output_root`.
///
/// Extraction finishes before anything is created on disk, so a manifest
/// that fails to decode or lacks a usable Deployment leaves no output behind.
///
/// # Errors
///
/// Any [`ChartError`] from extraction, rendering or file I/O.
pub fn extract_and_generate(
    manifest: &[u8],
    output_root: &Path,
    aux_files: &[PathBuf],
) -> Result<GenerationSummary, ChartError> {
    let model = extract::extract(manifest)?;
    tracing::info!(
        app_version = %model.app_version,
        cluster_roles = model.rbac.cluster_roles.len(),
        roles = model.rbac.roles.len(),
        "extracted manifest"
    );

    let generated = chart::generate(&model, output_root, aux_files)?;

    Ok(GenerationSummary {
        app_version: model.app_version,
        output_root: output_root.to_path_buf(),
        files: generated.files,
        crds_copied: generated.crds.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ManifestFixture;
    use tempfile::TempDir;

    #[test]
    fn test_summary_message() {
        let summary = GenerationSummary {
            app_version: "26.0.0".to_string(),
            output_root: PathBuf::from("chart"),
            files: Vec::new(),
            crds_copied: 0,
        };
        assert_eq!(summary.to_string(), "Generated Helm chart for keycloak-operator 26.0.0 in chart");
    }

    #[test]
    fn test_failed_extraction_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("chart");
        let manifest = ManifestFixture::minimal().without_deployment().to_yaml();

        let err = extract_and_generate(manifest.as_bytes(), &root, &[]).unwrap_err();

        assert!(matches!(err, ChartError::NoAppVersion));
        assert!(!root.exists());
    }
}
