//! Chart generation: render the model into a chart directory.
//!
//! [`generate`] renders every entry of [`OUTPUT_FILES`] with the generator
//! [`Syntax`] and writes it under the output root, then copies auxiliary
//! definitions into `crds/` unmodified. The layout is fixed:
//!
//! ```text
//! <root>/Chart.yaml
//! <root>/values.yaml
//! <root>/.helmignore
//! <root>/templates/…        rendered resource templates
//! <root>/crds/<basename>     auxiliary definitions, byte for byte
//! ```
//!
//! Files already written stay in place when a later step fails.

pub mod assets;

use std::path::{Path, PathBuf};

use crate::constants::{CRDS_DIR, TEMPLATES_DIR};
use crate::core::{ChartError, FileOperation, ensure_dir, read_file, write_file};
use crate::models::ChartModel;
use crate::templating::{Syntax, TemplateRenderer};

/// A chart file and the template it is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the chart root, `/`-separated
    pub path: &'static str,
    pub template: &'static str,
}

/// Every rendered chart file, in write order.
pub const OUTPUT_FILES: [OutputFile; 12] = [
    OutputFile {
        path: "Chart.yaml",
        template: assets::CHART_YAML,
    },
    OutputFile {
        path: "values.yaml",
        template: assets::VALUES_YAML,
    },
    OutputFile {
        path: ".helmignore",
        template: assets::HELMIGNORE,
    },
    OutputFile {
        path: "templates/_helpers.tpl",
        template: assets::HELPERS_TPL,
    },
    OutputFile {
        path: "templates/NOTES.txt",
        template: assets::NOTES_TXT,
    },
    OutputFile {
        path: "templates/serviceaccount.yaml",
        template: assets::SERVICE_ACCOUNT_YAML,
    },
    OutputFile {
        path: "templates/deployment.yaml",
        template: assets::DEPLOYMENT_YAML,
    },
    OutputFile {
        path: "templates/service.yaml",
        template: assets::SERVICE_YAML,
    },
    OutputFile {
        path: "templates/clusterrole.yaml",
        template: assets::CLUSTER_ROLE_YAML,
    },
    OutputFile {
        path: "templates/clusterrolebinding.yaml",
        template: assets::CLUSTER_ROLE_BINDING_YAML,
    },
    OutputFile {
        path: "templates/role.yaml",
        template: assets::ROLE_YAML,
    },
    OutputFile {
        path: "templates/rolebinding.yaml",
        template: assets::ROLE_BINDING_YAML,
    },
];

/// What [`generate`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedChart {
    /// Rendered files, in write order
    pub files: Vec<PathBuf>,
    /// Copied auxiliary definitions
    pub crds: Vec<PathBuf>,
}

/// Render `model` into a chart under `output_root` and copy `aux_files` into
/// its `crds/` directory.
///
/// # Errors
///
/// - [`ChartError::Template`] when a file fails to render
/// - [`ChartError::Io`] naming the path of any directory, file or auxiliary
///   definition that cannot be created, read or written
pub fn generate(
    model: &ChartModel,
    output_root: &Path,
    aux_files: &[PathBuf],
) -> Result<GeneratedChart, ChartError> {
    ensure_dir(&output_root.join(TEMPLATES_DIR))?;
    let crds_dir = ensure_dir(&output_root.join(CRDS_DIR))?;

    let mut renderer = TemplateRenderer::new(Syntax::GENERATOR)?;
    let context = TemplateRenderer::context(model)?;

    let mut generated = GeneratedChart::default();
    for file in &OUTPUT_FILES {
        let rendered = renderer.render(file.path, file.template, &context)?;
        let target = output_root.join(file.path);
        write_file(&target, rendered.as_bytes())?;
        tracing::debug!(file = file.path, bytes = rendered.len(), "rendered chart file");
        generated.files.push(target);
    }

    for source in aux_files {
        let target = crds_dir.join(base_name(source)?);
        let content = read_file(source)?;
        write_file(&target, &content)?;
        tracing::debug!(source = %source.display(), target = %target.display(), "copied definition");
        generated.crds.push(target);
    }

    tracing::info!(
        files = generated.files.len(),
        crds = generated.crds.len(),
        root = %output_root.display(),
        "chart written"
    );
    Ok(generated)
}

fn base_name(path: &Path) -> Result<&std::ffi::OsStr, ChartError> {
    path.file_name().ok_or_else(|| {
        FileOperation::Read.on(path)(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })
}
