//! Deployment and Service extraction.

use crate::constants::{KEYCLOAK_IMAGE_ENV, NAMESPACE_ENV};
use crate::core::ChartError;
use crate::manifest::{Document, Fields};
use crate::models::{
    DeploymentData, EnvVar, ProbeSpec, Probes, ResourceList, ResourceRequirements, ServiceData,
};

use super::naming::split_image;

/// What the collection stage takes from the Deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDeployment {
    pub operator_image_repository: String,
    /// Tag of the primary container image; may be empty
    pub app_version: String,
    pub keycloak_image_repository: String,
    pub data: DeploymentData,
}

/// Extract the primary container of a Deployment.
///
/// Only the first container is considered. Fails with
/// [`ChartError::NoContainers`] when there is none.
pub fn parse_deployment(document: &Document) -> Result<ExtractedDeployment, ChartError> {
    let label = document.label();
    let fields = Fields::new(&label, &document.body);

    let spec = fields.map("spec")?;
    let replicas = match &spec {
        Some(spec) => spec.uint("replicas")?,
        None => None,
    };
    let template = match &spec {
        Some(spec) => spec.map("template")?,
        None => None,
    };
    let pod_spec = match &template {
        Some(template) => template.map("spec")?,
        None => None,
    };
    let containers = match &pod_spec {
        Some(pod_spec) => pod_spec.items("containers")?,
        None => Vec::new(),
    };
    let Some(container) = containers.into_iter().next() else {
        return Err(ChartError::NoContainers {
            deployment: document.name.clone(),
        });
    };

    let image = container.str("image")?.unwrap_or_default();
    let (repository, tag) = split_image(image);

    let container_port = match container.items("ports")?.first() {
        Some(port) => port.uint("containerPort")?,
        None => None,
    };

    let resources = match container.map("resources")? {
        Some(resources) => parse_resources(&resources)?,
        None => ResourceRequirements::default(),
    };

    let probes = Probes {
        liveness: parse_probe(&container, "livenessProbe")?,
        readiness: parse_probe(&container, "readinessProbe")?,
        startup: parse_probe(&container, "startupProbe")?,
    };

    let mut keycloak_image_repository = String::new();
    let mut extra_env = Vec::new();
    for env in container.items("env")? {
        let name = env.require_str("name")?;
        match name {
            NAMESPACE_ENV => continue,
            KEYCLOAK_IMAGE_ENV => {
                let value = env.str("value")?.unwrap_or_default();
                keycloak_image_repository = split_image(value).0.to_string();
            }
            _ => match env.str("value")? {
                Some(value) => extra_env.push(EnvVar {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
                None if env.contains("valueFrom") => {
                    tracing::warn!(deployment = %document.name, env = name, "skipping non-literal env var");
                }
                None => extra_env.push(EnvVar {
                    name: name.to_string(),
                    value: String::new(),
                }),
            },
        }
    }

    Ok(ExtractedDeployment {
        operator_image_repository: repository.to_string(),
        app_version: tag.to_string(),
        keycloak_image_repository,
        data: DeploymentData {
            replicas: replicas.unwrap_or(1),
            container_name: container.require_str("name")?.to_string(),
            container_port,
            resources,
            probes,
            extra_env,
        },
    })
}

fn parse_resources(resources: &Fields<'_>) -> Result<ResourceRequirements, ChartError> {
    let list = |key: &str| -> Result<ResourceList, ChartError> {
        match resources.map(key)? {
            Some(list) => Ok(ResourceList {
                cpu: list.quantity("cpu")?,
                memory: list.quantity("memory")?,
            }),
            None => Ok(ResourceList::default()),
        }
    };

    Ok(ResourceRequirements {
        requests: list("requests")?,
        limits: list("limits")?,
    })
}

/// An HTTP probe; probes without an `httpGet.path` are dropped.
fn parse_probe(container: &Fields<'_>, key: &str) -> Result<Option<ProbeSpec>, ChartError> {
    let Some(probe) = container.map(key)? else {
        return Ok(None);
    };
    let path = match probe.map("httpGet")? {
        Some(http_get) => http_get.str("path")?,
        None => None,
    };
    let Some(path) = path else {
        tracing::warn!(probe = key, "probe has no httpGet path, omitting it");
        return Ok(None);
    };

    Ok(Some(ProbeSpec {
        path: path.to_string(),
        failure_threshold: probe
            .uint("failureThreshold")?
            .unwrap_or(ProbeSpec::DEFAULT_FAILURE_THRESHOLD),
        initial_delay_seconds: probe
            .uint("initialDelaySeconds")?
            .unwrap_or(ProbeSpec::DEFAULT_INITIAL_DELAY_SECONDS),
        period_seconds: probe.uint("periodSeconds")?.unwrap_or(ProbeSpec::DEFAULT_PERIOD_SECONDS),
        success_threshold: probe
            .uint("successThreshold")?
            .unwrap_or(ProbeSpec::DEFAULT_SUCCESS_THRESHOLD),
        timeout_seconds: probe.uint("timeoutSeconds")?.unwrap_or(ProbeSpec::DEFAULT_TIMEOUT_SECONDS),
    }))
}

/// Extract the type and first port of a Service.
pub fn parse_service(document: &Document) -> Result<ServiceData, ChartError> {
    let label = document.label();
    let fields = Fields::new(&label, &document.body);
    let spec = fields.require_map("spec")?;

    let port = match spec.items("ports")?.first() {
        Some(port) => port.uint("port")?,
        None => None,
    };

    Ok(ServiceData {
        service_type: spec.str("type")?.unwrap_or(crate::constants::FALLBACK_SERVICE_TYPE).to_string(),
        port: port.unwrap_or(crate::constants::FALLBACK_SERVICE_PORT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::decode_documents;

    fn document(yaml: &str) -> Document {
        decode_documents(yaml.as_bytes()).unwrap().remove(0)
    }

    const DEPLOYMENT: &str = r#"
kind: Deployment
metadata:
  name: keycloak-operator
spec:
  replicas: 2
  template:
    spec:
      containers:
        - name: keycloak-operator
          image: quay.io/keycloak/keycloak-operator:26.0.0
          ports:
            - containerPort: 8080
              name: http
            - containerPort: 9000
          resources:
            requests:
              cpu: 300m
              memory: 450Mi
            limits:
              cpu: 700m
              memory: 450Mi
          env:
            - name: KUBERNETES_NAMESPACE
              valueFrom:
                fieldRef:
                  fieldPath: metadata.namespace
            - name: RELATED_IMAGE_KEYCLOAK
              value: quay.io/keycloak/keycloak:26.0.0
            - name: QUARKUS_OPERATOR_SDK_CONTROLLERS_KEYCLOAKREALMIMPORTCONTROLLER_NAMESPACES
              value: JOSDK_WATCH_CURRENT
            - name: POD_IP
              valueFrom:
                fieldRef:
                  fieldPath: status.podIP
          livenessProbe:
            httpGet:
              path: /q/health/live
              port: 8080
            failureThreshold: 3
            initialDelaySeconds: 5
            periodSeconds: 10
            successThreshold: 1
            timeoutSeconds: 10
          startupProbe:
            httpGet:
              path: /q/health/started
              port: 8080
"#;

    #[test]
    fn test_parse_deployment() {
        let extracted = parse_deployment(&document(DEPLOYMENT)).unwrap();

        assert_eq!(extracted.app_version, "26.0.0");
        assert_eq!(extracted.operator_image_repository, "quay.io/keycloak/keycloak-operator");
        assert_eq!(extracted.keycloak_image_repository, "quay.io/keycloak/keycloak");

        let data = extracted.data;
        assert_eq!(data.replicas, 2);
        assert_eq!(data.container_name, "keycloak-operator");
        assert_eq!(data.container_port, Some(8080));
        assert_eq!(data.resources.requests.cpu.as_deref(), Some("300m"));
        assert_eq!(data.resources.limits.memory.as_deref(), Some("450Mi"));

        assert_eq!(data.extra_env.len(), 1);
        assert_eq!(data.extra_env[0].value, "JOSDK_WATCH_CURRENT");

        let liveness = data.probes.liveness.unwrap();
        assert_eq!(liveness.path, "/q/health/live");
        assert_eq!(liveness.initial_delay_seconds, 5);
        assert_eq!(liveness.timeout_seconds, 10);
        assert!(data.probes.readiness.is_none());
        assert_eq!(data.probes.startup, Some(ProbeSpec::with_defaults("/q/health/started")));
    }

    #[test]
    fn test_parse_deployment_without_containers() {
        let doc = document(
            "kind: Deployment\nmetadata:\n  name: op\nspec:\n  template:\n    spec:\n      containers: []\n",
        );
        let err = parse_deployment(&doc).unwrap_err();
        assert!(matches!(err, ChartError::NoContainers { ref deployment } if deployment == "op"));

        let bare = document("kind: Deployment\nmetadata:\n  name: op\n");
        assert!(matches!(parse_deployment(&bare), Err(ChartError::NoContainers { .. })));
    }

    #[test]
    fn test_parse_deployment_defaults() {
        let doc = document(
            "kind: Deployment\nmetadata:\n  name: op\nspec:\n  template:\n    spec:\n      containers:\n        - name: op\n          image: op\n",
        );
        let extracted = parse_deployment(&doc).unwrap();

        assert_eq!(extracted.app_version, "");
        assert_eq!(extracted.data.replicas, 1);
        assert_eq!(extracted.data.container_port, None);
        assert!(extracted.data.resources.requests.is_empty());
        assert_eq!(extracted.data.probes, Probes::default());
        assert_eq!(extracted.keycloak_image_repository, "");
    }

    #[test]
    fn test_parse_deployment_wrong_shape_fails_loudly() {
        let doc = document(
            "kind: Deployment\nmetadata:\n  name: op\nspec:\n  replicas: many\n  template:\n    spec:\n      containers:\n        - name: op\n          image: op:1\n",
        );
        let err = parse_deployment(&doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Deployment 'op': field 'spec.replicas' should be a non-negative integer but is a string"
        );
    }

    #[test]
    fn test_parse_service() {
        let doc = document(
            "kind: Service\nmetadata:\n  name: op\nspec:\n  type: ClusterIP\n  ports:\n    - port: 8080\n      targetPort: 8080\n",
        );
        let service = parse_service(&doc).unwrap();
        assert_eq!(service.service_type, "ClusterIP");
        assert_eq!(service.port, 8080);
    }
}
