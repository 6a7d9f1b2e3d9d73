//! The normalized chart model
//!
//! [`ChartModel`] is the only thing the generator sees of the upstream
//! manifest. It is built once per run by [`crate::extract`], serialized into
//! the template context, and dropped when generation finishes.
//!
//! Field names serialize in `snake_case`; templates address them as
//! `deployment.container_port`, `rbac.cluster_roles`, and so on.

use serde::Serialize;

/// Everything extracted from an upstream manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartModel {
    /// Tag of the operator image; never empty
    pub app_version: String,
    /// Repository part of the operator image
    pub operator_image_repository: String,
    /// Repository part of the secondary (server) image, empty if not declared
    pub keycloak_image_repository: String,
    pub deployment: DeploymentData,
    pub service: ServiceData,
    pub rbac: RbacData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeploymentData {
    pub replicas: u32,
    pub container_name: String,
    /// First declared container port
    pub container_port: Option<u32>,
    pub resources: ResourceRequirements,
    pub probes: Probes,
    /// Literal environment variables, in declaration order, minus the reserved ones
    pub extra_env: Vec<EnvVar>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceRequirements {
    pub requests: ResourceList,
    pub limits: ResourceList,
}

/// CPU and memory quantities, kept exactly as written upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceList {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

impl ResourceList {
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.memory.is_none()
    }
}

/// The three container probes. `None` means the probe is omitted from the chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Probes {
    pub liveness: Option<ProbeSpec>,
    pub readiness: Option<ProbeSpec>,
    pub startup: Option<ProbeSpec>,
}

/// An HTTP GET probe and its tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeSpec {
    pub path: String,
    pub failure_threshold: u32,
    pub initial_delay_seconds: u32,
    pub period_seconds: u32,
    pub success_threshold: u32,
    pub timeout_seconds: u32,
}

impl ProbeSpec {
    // Kubernetes API defaults for fields left unset upstream.
    pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;
    pub const DEFAULT_INITIAL_DELAY_SECONDS: u32 = 0;
    pub const DEFAULT_PERIOD_SECONDS: u32 = 10;
    pub const DEFAULT_SUCCESS_THRESHOLD: u32 = 1;
    pub const DEFAULT_TIMEOUT_SECONDS: u32 = 1;

    /// A probe on `path` with every tuning field at its Kubernetes default.
    pub fn with_defaults(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            failure_threshold: Self::DEFAULT_FAILURE_THRESHOLD,
            initial_delay_seconds: Self::DEFAULT_INITIAL_DELAY_SECONDS,
            period_seconds: Self::DEFAULT_PERIOD_SECONDS,
            success_threshold: Self::DEFAULT_SUCCESS_THRESHOLD,
            timeout_seconds: Self::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceData {
    #[serde(rename = "type")]
    pub service_type: String,
    pub port: u32,
}

/// RBAC resources, each list in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RbacData {
    pub cluster_roles: Vec<Role>,
    pub cluster_role_bindings: Vec<Binding>,
    pub roles: Vec<Role>,
    pub role_bindings: Vec<Binding>,
}

/// A ClusterRole or Role defined by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub original_name: String,
    pub suffix: String,
    /// The `rules` attribute re-serialized as YAML, never interpreted
    pub rules_yaml: String,
}

/// A ClusterRoleBinding or RoleBinding with its role reference resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub original_name: String,
    pub suffix: String,
    pub role_ref_kind: String,
    /// The reference exactly as written upstream
    pub role_ref_name: String,
    /// Suffix of the referenced managed role; empty when `is_builtin_role`
    pub role_suffix: String,
    /// The referenced role is not defined by the manifest
    pub is_builtin_role: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_defaults() {
        let probe = ProbeSpec::with_defaults("/q/health/live");
        assert_eq!(probe.path, "/q/health/live");
        assert_eq!(probe.failure_threshold, 3);
        assert_eq!(probe.period_seconds, 10);
        assert_eq!(probe.success_threshold, 1);
    }

    #[test]
    fn test_service_type_serializes_as_type() {
        let service = ServiceData {
            service_type: "ClusterIP".to_string(),
            port: 8080,
        };
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["type"], "ClusterIP");
        assert_eq!(json["port"], 8080);
    }

    #[test]
    fn test_resource_list_is_empty() {
        assert!(ResourceList::default().is_empty());
        let list = ResourceList {
            cpu: Some("500m".to_string()),
            memory: None,
        };
        assert!(!list.is_empty());
    }
}
