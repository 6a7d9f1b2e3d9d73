//! Error handling for chart generation
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`ChartError`]) so callers and tests can match on
//!    the exact failure
//! 2. **User-friendly messages** ([`ErrorContext`]) with a suggestion for CLI users
//!
//! # Error Categories
//!
//! Every [`ChartError`] belongs to exactly one [`ErrorCategory`]:
//! - **Decode**: the manifest stream is not valid YAML, or a document is not a mapping
//! - **Structural**: an expected resource or field is absent or has the wrong shape
//! - **Template**: a chart template could not be translated or rendered
//! - **Io**: a file or directory could not be read, written or created
//!
//! All categories are terminal. A run never retries and never downgrades an
//! error to a warning.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kube_chartgen::core::{ChartError, user_friendly_error};
//!
//! let ctx = user_friendly_error(anyhow::Error::from(ChartError::NoAppVersion));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::file_error::FileOperation;

/// Broad classification of a [`ChartError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Decode,
    Structural,
    Template,
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Decode => write!(f, "decode"),
            ErrorCategory::Structural => write!(f, "structural"),
            ErrorCategory::Template => write!(f, "template"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// What was wrong with a single field of a manifest document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    /// The field is required but absent
    Missing,
    /// The field is present but holds a different kind of value
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "is missing"),
            FieldProblem::WrongShape {
                expected,
                found,
            } => write!(f, "should be {expected} but is {found}"),
        }
    }
}

/// The main error type for manifest extraction and chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    /// A document of the manifest stream is not valid YAML
    #[error("Failed to decode manifest document {document}: {source}")]
    Decode {
        /// 1-based position of the document in the stream
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    /// A non-empty document whose top level is not a mapping
    #[error("Manifest document {document} is not a mapping")]
    NotAMapping {
        document: usize,
    },

    /// The Deployment declares no containers
    #[error("Deployment '{deployment}' has no containers")]
    NoContainers {
        deployment: String,
    },

    /// A ClusterRole or Role without a `rules` attribute
    #[error("{kind} '{name}' has no rules")]
    MissingRules {
        kind: &'static str,
        name: String,
    },

    /// The `rules` of a ClusterRole or Role could not be written back out as YAML
    #[error("Failed to serialize the rules of {kind} '{name}': {source}")]
    RulesEncoding {
        kind: &'static str,
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// No Deployment was found, or its image reference carries no tag
    #[error("No usable application version: no Deployment found or its image tag is missing")]
    NoAppVersion,

    /// A field was absent when required, or had the wrong shape
    #[error("{resource}: field '{path}' {problem}")]
    Field {
        /// Resource description, e.g. `Deployment 'keycloak-operator'`
        resource: String,
        /// Dotted path of the offending field
        path: String,
        problem: FieldProblem,
    },

    /// A generator delimiter contains a character reserved by the chart runtime
    #[error("Generator delimiter '{token}' collides with the chart runtime template syntax")]
    DelimiterConflict {
        token: String,
    },

    /// A chart template failed to translate or render
    #[error("Failed to render {file}: {message}")]
    Template {
        file: String,
        message: String,
    },

    /// A filesystem operation failed
    #[error("I/O error {operation} {}: {source}", .path.display())]
    Io {
        operation: FileOperation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    /// The category this error belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            ChartError::Decode {
                ..
            }
            | ChartError::NotAMapping {
                ..
            } => ErrorCategory::Decode,
            ChartError::NoContainers {
                ..
            }
            | ChartError::MissingRules {
                ..
            }
            | ChartError::RulesEncoding {
                ..
            }
            | ChartError::NoAppVersion
            | ChartError::Field {
                ..
            } => ErrorCategory::Structural,
            ChartError::DelimiterConflict {
                ..
            }
            | ChartError::Template {
                ..
            } => ErrorCategory::Template,
            ChartError::Io {
                ..
            } => ErrorCategory::Io,
        }
    }

    pub(crate) fn template(file: impl Into<String>, message: impl Into<String>) -> Self {
        ChartError::Template {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Error wrapper carrying user-facing details and a suggestion
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// Walks the error chain looking for a [`ChartError`]; the outermost anyhow
/// context (if any) is kept as the headline so the failing operation is named.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let headline = format!("{error:#}");

    let chart_error = error.chain().find_map(|e| e.downcast_ref::<ChartError>());
    let Some(chart_error) = chart_error else {
        return ErrorContext::new(headline);
    };

    let ctx = ErrorContext::new(headline);
    match chart_error {
        ChartError::Decode {
            ..
        }
        | ChartError::NotAMapping {
            ..
        } => ctx
            .with_details("Every document in the manifest must be a YAML mapping")
            .with_suggestion("Validate the manifest with `kubectl apply --dry-run=client -f <file>`"),
        ChartError::NoContainers {
            ..
        } => ctx.with_suggestion("Check spec.template.spec.containers in the Deployment"),
        ChartError::MissingRules {
            ..
        }
        | ChartError::RulesEncoding {
            ..
        } => ctx.with_details("Roles are copied into the chart with their rules verbatim"),
        ChartError::NoAppVersion => ctx
            .with_details("The chart appVersion is taken from the tag of the Deployment's first container image")
            .with_suggestion("Make sure the manifest contains a Deployment whose image is pinned as repository:tag"),
        ChartError::Field {
            ..
        } => ctx.with_suggestion("Fix the field in the manifest or remove it"),
        ChartError::DelimiterConflict {
            ..
        }
        | ChartError::Template {
            ..
        } => ctx.with_details(format!("{} error", chart_error.category())),
        ChartError::Io {
            source,
            ..
        } => match source.kind() {
            std::io::ErrorKind::PermissionDenied => {
                ctx.with_suggestion("Check file ownership and permissions of the path")
            }
            std::io::ErrorKind::NotFound => {
                ctx.with_suggestion("Check that the file or directory exists and the path is correct")
            }
            _ => ctx,
        },
    }
}
