//! Command-line interface for chartgen.
//!
//! One command, no subcommands: read an upstream manifest, write a chart.
//!
//! ```bash
//! chartgen --manifest kubernetes.yml --output chart \
//!     --crd keycloaks.k8s.keycloak.org-v1.yml \
//!     --crd keycloakrealmimports.k8s.keycloak.org-v1.yml
//! ```
//!
//! Every flag that names a path can also come from the environment
//! (`CHARTGEN_MANIFEST`, `CHARTGEN_OUTPUT`). Logging goes to stderr and
//! honours `RUST_LOG`, which takes precedence over `--verbose`/`--quiet`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::GenerationSummary;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::core::read_file;

/// Runtime configuration derived from the parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset: `"debug"`, `"info"` or `"error"`
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Install the global `tracing` subscriber.
    ///
    /// Only the first call in a process takes effect, so tests may call this
    /// freely.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Generate a Helm chart from the upstream Keycloak operator manifest.
#[derive(Parser, Debug)]
#[command(
    name = "chartgen",
    about = "Generate a Helm chart from the upstream Keycloak operator manifest",
    version,
    author
)]
pub struct Cli {
    /// Upstream multi-document manifest (kubernetes.yml)
    #[arg(long, value_name = "PATH", env = "CHARTGEN_MANIFEST")]
    manifest: PathBuf,

    /// Chart root directory; created if missing
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR, env = "CHARTGEN_OUTPUT")]
    output: PathBuf,

    /// Custom resource definition copied into `crds/` unmodified (repeatable)
    #[arg(long = "crd", value_name = "PATH")]
    crds: Vec<PathBuf>,

    /// Log debug detail for every document and rendered file
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Map `--verbose`/`--quiet` to a [`CliConfig`].
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
        }
    }

    /// Read the manifest and generate the chart.
    ///
    /// # Errors
    ///
    /// Any [`ChartError`](crate::core::ChartError), with the manifest path
    /// attached as context.
    pub fn execute(self) -> Result<GenerationSummary> {
        tracing::debug!(manifest = %self.manifest.display(), output = %self.output.display(), crds = self.crds.len(), "starting");

        let manifest = read_file(&self.manifest)?;
        crate::extract_and_generate(&manifest, &self.output, &self.crds)
            .with_context(|| format!("Failed to generate chart from {}", self.manifest.display()))
    }
}
