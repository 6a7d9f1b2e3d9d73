//! Manifest extraction: raw bytes to [`ChartModel`].
//!
//! Extraction runs as two explicit stages over the decoded documents:
//!
//! 1. [`collect`] takes the Deployment, the Service and every ClusterRole and
//!    Role. Its output, [`Collected`], produces the [`RoleTable`].
//! 2. [`resolve`] takes every ClusterRoleBinding and RoleBinding and resolves
//!    its `roleRef` against that table. It receives the table by value, so it
//!    cannot start before collection has finished.
//!
//! Because of the split, a binding that appears before its role in the
//! manifest resolves exactly like one that appears after it.
//!
//! # Examples
//!
//! ```rust,no_run
//! let manifest = std::fs::read("kubernetes.yml")?;
//! let model = kube_chartgen::extract::extract(&manifest)?;
//! println!("appVersion {}", model.app_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod naming;
mod rbac;
mod workload;

pub use naming::{derive_suffix, split_image};
pub use rbac::{RoleTable, parse_role, resolve_binding};
pub use workload::{ExtractedDeployment, parse_deployment, parse_service};

use crate::constants::{FALLBACK_SERVICE_PORT, FALLBACK_SERVICE_TYPE};
use crate::core::ChartError;
use crate::manifest::{Document, ResourceKind, decode_documents};
use crate::models::{Binding, ChartModel, RbacData, Role, ServiceData};

/// Decode `manifest` and build the normalized model.
///
/// # Errors
///
/// Any decode or structural [`ChartError`]; in particular
/// [`ChartError::NoAppVersion`] when there is no Deployment or its image has
/// no tag.
pub fn extract(manifest: &[u8]) -> Result<ChartModel, ChartError> {
    let documents = decode_documents(manifest)?;
    tracing::debug!(documents = documents.len(), "decoded manifest");

    let collected = collect(&documents)?;
    let table = collected.role_table();
    let bindings = resolve(&documents, table)?;
    collected.finish(bindings)
}

/// Output of the collection stage.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub cluster_roles: Vec<Role>,
    pub roles: Vec<Role>,
    pub deployment: Option<ExtractedDeployment>,
    pub service: Option<ServiceData>,
}

/// Output of the resolution stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBindings {
    pub cluster_role_bindings: Vec<Binding>,
    pub role_bindings: Vec<Binding>,
}

impl Collected {
    /// Lookup table over every collected ClusterRole and Role.
    pub fn role_table(&self) -> RoleTable {
        RoleTable::from_roles(self.cluster_roles.iter().chain(&self.roles))
    }

    /// Combine with the resolved bindings into the final model.
    pub fn finish(self, bindings: ResolvedBindings) -> Result<ChartModel, ChartError> {
        let Some(deployment) = self.deployment else {
            return Err(ChartError::NoAppVersion);
        };
        if deployment.app_version.is_empty() {
            return Err(ChartError::NoAppVersion);
        }

        let service = match self.service {
            Some(service) => service,
            None => {
                let port = deployment.data.container_port.unwrap_or(FALLBACK_SERVICE_PORT);
                tracing::warn!(port, "manifest has no Service, using a {FALLBACK_SERVICE_TYPE} default");
                ServiceData {
                    service_type: FALLBACK_SERVICE_TYPE.to_string(),
                    port,
                }
            }
        };

        Ok(ChartModel {
            app_version: deployment.app_version,
            operator_image_repository: deployment.operator_image_repository,
            keycloak_image_repository: deployment.keycloak_image_repository,
            deployment: deployment.data,
            service,
            rbac: RbacData {
                cluster_roles: self.cluster_roles,
                cluster_role_bindings: bindings.cluster_role_bindings,
                roles: self.roles,
                role_bindings: bindings.role_bindings,
            },
        })
    }
}

/// Stage one: roles, the Deployment and the Service.
///
/// The first Deployment and the first Service win; later ones are logged and
/// ignored.
pub fn collect(documents: &[Document]) -> Result<Collected, ChartError> {
    let mut collected = Collected::default();

    for document in documents {
        match &document.kind {
            ResourceKind::ClusterRole => {
                collected.cluster_roles.push(parse_role(document, "ClusterRole")?);
            }
            ResourceKind::Role => {
                collected.roles.push(parse_role(document, "Role")?);
            }
            ResourceKind::Deployment => {
                if collected.deployment.is_some() {
                    tracing::warn!(name = %document.name, "ignoring additional Deployment");
                    continue;
                }
                collected.deployment = Some(parse_deployment(document)?);
            }
            ResourceKind::Service => {
                if collected.service.is_some() {
                    tracing::warn!(name = %document.name, "ignoring additional Service");
                    continue;
                }
                collected.service = Some(parse_service(document)?);
            }
            ResourceKind::ClusterRoleBinding | ResourceKind::RoleBinding => {}
            ResourceKind::Unrecognized(kind) => {
                tracing::warn!(kind = %kind, name = %document.name, "ignoring unsupported resource");
            }
            ResourceKind::Missing => {
                tracing::warn!(document = document.index, "ignoring document without kind");
            }
        }
    }

    Ok(collected)
}

/// Stage two: bindings, resolved against the complete role table.
pub fn resolve(documents: &[Document], table: RoleTable) -> Result<ResolvedBindings, ChartError> {
    let mut resolved = ResolvedBindings::default();

    for document in documents {
        match &document.kind {
            ResourceKind::ClusterRoleBinding => {
                resolved.cluster_role_bindings.push(resolve_binding(document, &table)?);
            }
            ResourceKind::RoleBinding => {
                resolved.role_bindings.push(resolve_binding(document, &table)?);
            }
            ResourceKind::ClusterRole
            | ResourceKind::Role
            | ResourceKind::Deployment
            | ResourceKind::Service
            | ResourceKind::Unrecognized(_)
            | ResourceKind::Missing => {}
        }
    }

    tracing::debug!(
        managed_roles = table.len(),
        cluster_role_bindings = resolved.cluster_role_bindings.len(),
        role_bindings = resolved.role_bindings.len(),
        "resolved bindings"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ManifestFixture;

    #[test]
    fn test_extract_minimal_manifest() {
        let model = extract(ManifestFixture::minimal().to_yaml().as_bytes()).unwrap();

        assert_eq!(model.app_version, "26.0.0");
        assert_eq!(model.operator_image_repository, "quay.io/keycloak/keycloak-operator");
        assert_eq!(model.service.service_type, "ClusterIP");
        assert_eq!(model.service.port, 8080);
        assert_eq!(model.deployment.container_port, Some(8080));

        assert_eq!(model.rbac.cluster_roles.len(), 1);
        assert_eq!(model.rbac.cluster_roles[0].suffix, "cluster");
        let binding = &model.rbac.cluster_role_bindings[0];
        assert!(!binding.is_builtin_role);
        assert_eq!(binding.role_suffix, "cluster");
    }

    #[test]
    fn test_binding_before_role_resolves_the_same() {
        let role_first = ManifestFixture::minimal();
        let binding_first = ManifestFixture::minimal().bindings_first();

        let a = extract(role_first.to_yaml().as_bytes()).unwrap();
        let b = extract(binding_first.to_yaml().as_bytes()).unwrap();
        assert_eq!(a.rbac, b.rbac);
    }

    #[test]
    fn test_builtin_role_reference_is_preserved() {
        let manifest = ManifestFixture::minimal()
            .with_role_binding("keycloak-operator-view", "ClusterRole", "view")
            .to_yaml();
        let model = extract(manifest.as_bytes()).unwrap();

        let binding = &model.rbac.role_bindings[0];
        assert!(binding.is_builtin_role);
        assert_eq!(binding.role_ref_name, "view");
        assert_eq!(binding.role_suffix, "");
    }

    #[test]
    fn test_no_deployment_is_an_error() {
        let manifest = ManifestFixture::minimal().without_deployment().to_yaml();
        let err = extract(manifest.as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::NoAppVersion));
    }

    #[test]
    fn test_untagged_image_is_an_error() {
        let manifest = ManifestFixture::minimal().with_image("quay.io/keycloak/keycloak-operator").to_yaml();
        let err = extract(manifest.as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::NoAppVersion));
    }

    #[test]
    fn test_missing_service_falls_back() {
        let manifest = ManifestFixture::minimal().without_service().to_yaml();
        let model = extract(manifest.as_bytes()).unwrap();
        assert_eq!(model.service.service_type, FALLBACK_SERVICE_TYPE);
        assert_eq!(model.service.port, 8080);
    }

    #[test]
    fn test_first_deployment_and_service_win() {
        let manifest = ManifestFixture::minimal()
            .with_document(
                "kind: Deployment\nmetadata:\n  name: other\nspec:\n  template:\n    spec:\n      containers:\n        - name: other\n          image: other/img:9.9.9\n",
            )
            .with_document("kind: Deployment\nmetadata:\n  name: empty\nspec:\n  template:\n    spec:\n      containers: []\n")
            .with_document("kind: Service\nmetadata:\n  name: other\nspec:\n  type: NodePort\n  ports:\n    - port: 9999\n")
            .to_yaml();
        let model = extract(manifest.as_bytes()).unwrap();

        assert_eq!(model.app_version, "26.0.0");
        assert_eq!(model.operator_image_repository, "quay.io/keycloak/keycloak-operator");
        assert_eq!(model.deployment.container_name, "keycloak-operator");
        assert_eq!(model.service.service_type, "ClusterIP");
        assert_eq!(model.service.port, 8080);
    }

    #[test]
    fn test_roles_of_both_scopes_feed_one_table() {
        let manifest = ManifestFixture::minimal()
            .with_role("keycloakcontroller-role")
            .with_role_binding("keycloakcontroller-role-binding", "Role", "keycloakcontroller-role")
            .to_yaml();
        let model = extract(manifest.as_bytes()).unwrap();

        assert_eq!(model.rbac.roles[0].suffix, "keycloak-role");
        let binding = &model.rbac.role_bindings[0];
        assert!(!binding.is_builtin_role);
        assert_eq!(binding.role_suffix, "keycloak-role");
        assert_eq!(binding.suffix, "keycloak-role-binding");
    }
}
