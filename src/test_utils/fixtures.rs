//! Test fixtures for building upstream operator manifests
//!
//! [`ManifestFixture`] assembles a multi-document manifest from a handful of
//! resources. Start from [`ManifestFixture::minimal`] and adjust it with the
//! builder methods.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const RULES: &str = r#"rules:
  - apiGroups:
      - apiextensions.k8s.io
    resources:
      - customresourcedefinitions
    verbs:
      - get
      - list
"#;

/// A role or binding document in the fixture.
#[derive(Clone, Debug)]
enum RbacDocument {
    Role {
        kind: &'static str,
        name: String,
    },
    Binding {
        kind: &'static str,
        name: String,
        role_kind: String,
        role_name: String,
    },
}

impl RbacDocument {
    fn is_binding(&self) -> bool {
        matches!(self, RbacDocument::Binding { .. })
    }

    fn to_yaml(&self) -> String {
        match self {
            RbacDocument::Role {
                kind,
                name,
            } => format!(
                "apiVersion: rbac.authorization.k8s.io/v1\nkind: {kind}\nmetadata:\n  name: {name}\n{RULES}"
            ),
            RbacDocument::Binding {
                kind,
                name,
                role_kind,
                role_name,
            } => format!(
                "apiVersion: rbac.authorization.k8s.io/v1\nkind: {kind}\nmetadata:\n  name: {name}\nroleRef:\n  kind: {role_kind}\n  apiGroup: rbac.authorization.k8s.io\n  name: {role_name}\nsubjects:\n  - kind: ServiceAccount\n    name: keycloak-operator\n"
            ),
        }
    }
}

/// Builder for upstream operator manifests
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    image: Option<String>,
    service: bool,
    rbac: Vec<RbacDocument>,
    bindings_first: bool,
    extra: Vec<String>,
}

impl ManifestFixture {
    /// Deployment (`quay.io/keycloak/keycloak-operator:26.0.0`, port 8080, no
    /// probes), a ClusterIP Service on 8080, the ClusterRole
    /// `keycloak-operator-cluster` and a ClusterRoleBinding referencing it.
    pub fn minimal() -> Self {
        Self {
            image: Some("quay.io/keycloak/keycloak-operator:26.0.0".to_string()),
            service: true,
            rbac: vec![
                RbacDocument::Role {
                    kind: "ClusterRole",
                    name: "keycloak-operator-cluster".to_string(),
                },
                RbacDocument::Binding {
                    kind: "ClusterRoleBinding",
                    name: "keycloak-operator-cluster-binding".to_string(),
                    role_kind: "ClusterRole".to_string(),
                    role_name: "keycloak-operator-cluster".to_string(),
                },
            ],
            bindings_first: false,
            extra: Vec::new(),
        }
    }

    /// Replace the operator image reference.
    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn without_deployment(mut self) -> Self {
        self.image = None;
        self
    }

    pub fn without_service(mut self) -> Self {
        self.service = false;
        self
    }

    /// Add a namespace-scoped Role.
    pub fn with_role(mut self, name: &str) -> Self {
        self.rbac.push(RbacDocument::Role {
            kind: "Role",
            name: name.to_string(),
        });
        self
    }

    /// Add a RoleBinding pointing at `role_kind`/`role_name`.
    pub fn with_role_binding(mut self, name: &str, role_kind: &str, role_name: &str) -> Self {
        self.rbac.push(RbacDocument::Binding {
            kind: "RoleBinding",
            name: name.to_string(),
            role_kind: role_kind.to_string(),
            role_name: role_name.to_string(),
        });
        self
    }

    /// Emit every binding before any role.
    pub fn bindings_first(mut self) -> Self {
        self.bindings_first = true;
        self
    }

    /// Append a raw YAML document.
    pub fn with_document(mut self, yaml: &str) -> Self {
        self.extra.push(yaml.to_string());
        self
    }

    /// Render the manifest as a multi-document YAML stream.
    pub fn to_yaml(&self) -> String {
        let mut documents = Vec::new();

        if let Some(image) = &self.image {
            documents.push(deployment(image));
        }
        if self.service {
            documents.push(SERVICE.to_string());
        }

        let (bindings, roles): (Vec<_>, Vec<_>) = self.rbac.iter().partition(|d| d.is_binding());
        let ordered = if self.bindings_first {
            bindings.into_iter().chain(roles)
        } else {
            roles.into_iter().chain(bindings)
        };
        documents.extend(ordered.map(RbacDocument::to_yaml));
        documents.extend(self.extra.iter().cloned());

        documents.join("---\n")
    }

    /// Write the manifest to `dir/kubernetes.yml` and return its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("kubernetes.yml");
        fs::write(&path, self.to_yaml())
            .with_context(|| format!("Failed to write manifest fixture to {}", path.display()))?;
        Ok(path)
    }
}

const SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: keycloak-operator
spec:
  type: ClusterIP
  ports:
    - name: http
      port: 8080
      protocol: TCP
      targetPort: 8080
  selector:
    app.kubernetes.io/name: keycloak-operator
"#;

fn deployment(image: &str) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: keycloak-operator
spec:
  replicas: 1
  selector:
    matchLabels:
      app.kubernetes.io/name: keycloak-operator
  template:
    metadata:
      labels:
        app.kubernetes.io/name: keycloak-operator
    spec:
      serviceAccountName: keycloak-operator
      containers:
        - name: keycloak-operator
          image: {image}
          imagePullPolicy: Always
          ports:
            - containerPort: 8080
              name: http
              protocol: TCP
          env:
            - name: KUBERNETES_NAMESPACE
              valueFrom:
                fieldRef:
                  fieldPath: metadata.namespace
            - name: RELATED_IMAGE_KEYCLOAK
              value: quay.io/keycloak/keycloak:26.0.0
"#
    )
}
