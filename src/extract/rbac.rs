//! RBAC extraction: roles in the collection stage, bindings in the resolution stage.
//!
//! Bindings may reference roles that appear later in the manifest, so the
//! extractor first builds a [`RoleTable`] from every ClusterRole and Role and
//! only then resolves bindings against it. [`RoleTable`] can only be produced
//! by [`RoleTable::from_roles`], which keeps resolution from running on a
//! partial table.

use std::collections::HashMap;

use crate::core::ChartError;
use crate::manifest::{Document, Fields};
use crate::models::{Binding, Role};

use super::naming::derive_suffix;

/// Upstream role name to derived suffix, for every role the manifest defines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable {
    suffixes: HashMap<String, String>,
}

impl RoleTable {
    /// Build the table from the complete set of collected roles.
    pub fn from_roles<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let suffixes = roles
            .into_iter()
            .map(|role| (role.original_name.clone(), role.suffix.clone()))
            .collect();
        Self {
            suffixes,
        }
    }

    /// Suffix of the managed role called `name`, if the manifest defines one.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.suffixes.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

/// Extract a ClusterRole or Role, keeping its rules as opaque YAML text.
pub fn parse_role(document: &Document, kind: &'static str) -> Result<Role, ChartError> {
    let label = document.label();
    let fields = Fields::new(&label, &document.body);

    let rules = fields.get("rules").ok_or_else(|| ChartError::MissingRules {
        kind,
        name: document.name.clone(),
    })?;
    let rules_yaml = serde_yaml::to_string(rules).map_err(|source| ChartError::RulesEncoding {
        kind,
        name: document.name.clone(),
        source,
    })?;

    Ok(Role {
        original_name: document.name.clone(),
        suffix: derive_suffix(&document.name),
        rules_yaml: rules_yaml.trim_end_matches('\n').to_string(),
    })
}

/// Extract a ClusterRoleBinding or RoleBinding and resolve its `roleRef`.
///
/// A reference to a role the manifest does not define is kept verbatim and
/// flagged as builtin.
pub fn resolve_binding(document: &Document, table: &RoleTable) -> Result<Binding, ChartError> {
    let label = document.label();
    let fields = Fields::new(&label, &document.body);
    let role_ref = fields.require_map("roleRef")?;
    let role_ref_kind = role_ref.require_str("kind")?;
    let role_ref_name = role_ref.require_str("name")?;

    let resolved = table.resolve(role_ref_name);
    match resolved {
        Some(suffix) => tracing::debug!(binding = %document.name, role = role_ref_name, suffix, "resolved managed role"),
        None => tracing::debug!(binding = %document.name, role = role_ref_name, "role is not managed, keeping reference"),
    }

    Ok(Binding {
        original_name: document.name.clone(),
        suffix: derive_suffix(&document.name),
        role_ref_kind: role_ref_kind.to_string(),
        role_ref_name: role_ref_name.to_string(),
        role_suffix: resolved.unwrap_or_default().to_string(),
        is_builtin_role: resolved.is_none(),
    })
}
