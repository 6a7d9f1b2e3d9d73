//! Decoding of multi-document Kubernetes manifests.
//!
//! A manifest is a YAML stream of zero or more documents. [`decode_documents`]
//! turns the raw bytes into [`Document`] values, each tagged with a closed
//! [`ResourceKind`]. Empty documents are skipped; the first document that is
//! not valid YAML, or whose top level is not a mapping, aborts decoding.
//!
//! Documents keep their attribute tree as an untyped [`Mapping`]; typed values
//! are pulled out of it through [`Fields`] when the model is built.

pub mod fields;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fmt;

use crate::core::ChartError;
pub use fields::Fields;

/// The resource kinds the extractor understands.
///
/// Anything else decodes to [`ResourceKind::Unrecognized`] (or
/// [`ResourceKind::Missing`] when the document has no `kind`), which the
/// extractor logs and skips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    ClusterRole,
    Role,
    ClusterRoleBinding,
    RoleBinding,
    Deployment,
    Service,
    Unrecognized(String),
    Missing,
}

impl ResourceKind {
    /// Map the `kind` string of a document onto the closed set of kinds.
    ///
    /// Matching is exact, as in the Kubernetes API.
    pub fn parse(kind: Option<&str>) -> Self {
        match kind {
            Some("ClusterRole") => ResourceKind::ClusterRole,
            Some("Role") => ResourceKind::Role,
            Some("ClusterRoleBinding") => ResourceKind::ClusterRoleBinding,
            Some("RoleBinding") => ResourceKind::RoleBinding,
            Some("Deployment") => ResourceKind::Deployment,
            Some("Service") => ResourceKind::Service,
            Some(other) => ResourceKind::Unrecognized(other.to_string()),
            None => ResourceKind::Missing,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::ClusterRole => "ClusterRole",
            ResourceKind::Role => "Role",
            ResourceKind::ClusterRoleBinding => "ClusterRoleBinding",
            ResourceKind::RoleBinding => "RoleBinding",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::Unrecognized(kind) => kind,
            ResourceKind::Missing => "<no kind>",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded, non-empty document of a manifest.
#[derive(Debug, Clone)]
pub struct Document {
    /// 1-based position in the stream, counting empty documents
    pub index: usize,
    pub kind: ResourceKind,
    /// `metadata.name`, or an empty string when absent
    pub name: String,
    pub body: Mapping,
}

impl Document {
    /// Human-readable description used in error messages, e.g. `Deployment 'op'`.
    pub fn label(&self) -> String {
        format!("{} '{}'", self.kind, self.name)
    }

    fn from_mapping(index: usize, body: Mapping) -> Result<Self, ChartError> {
        let label = format!("document {index}");
        let fields = Fields::new(&label, &body);
        let kind = ResourceKind::parse(fields.str("kind")?);
        let name = match fields.map("metadata")? {
            Some(metadata) => metadata.str("name")?.unwrap_or_default().to_string(),
            None => String::new(),
        };

        Ok(Self {
            index,
            kind,
            name,
            body,
        })
    }
}

/// Split a YAML stream into its non-empty documents.
///
/// # Errors
///
/// - [`ChartError::Decode`] for the first document that is not valid YAML
/// - [`ChartError::NotAMapping`] for a non-empty document whose top level is
///   not a mapping
/// - [`ChartError::Field`] when `kind` or `metadata.name` is not a string
pub fn decode_documents(bytes: &[u8]) -> Result<Vec<Document>, ChartError> {
    let mut documents = Vec::new();

    for (i, de) in serde_yaml::Deserializer::from_slice(bytes).enumerate() {
        let index = i + 1;
        let value = Value::deserialize(de).map_err(|source| ChartError::Decode {
            document: index,
            source,
        })?;

        let body = match value {
            Value::Null => {
                tracing::trace!(document = index, "skipping empty document");
                continue;
            }
            Value::Mapping(body) => body,
            _ => {
                return Err(ChartError::NotAMapping {
                    document: index,
                });
            }
        };

        let document = Document::from_mapping(index, body)?;
        tracing::debug!(document = index, kind = %document.kind, name = %document.name, "decoded document");
        documents.push(document);
    }

    Ok(documents)
}
