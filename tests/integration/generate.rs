//! End-to-end generation through the library entry point.

use std::fs;

use kube_chartgen::chart::OUTPUT_FILES;
use kube_chartgen::core::{ChartError, ErrorCategory, FileOperation};
use kube_chartgen::extract_and_generate;
use kube_chartgen::test_utils::{ManifestFixture, init_test_logging};
use tempfile::TempDir;

#[test]
fn test_minimal_manifest_produces_full_layout() {
    init_test_logging(None);
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("chart");

    let summary = extract_and_generate(ManifestFixture::minimal().to_yaml().as_bytes(), &root, &[]).unwrap();

    assert_eq!(summary.app_version, "26.0.0");
    assert_eq!(summary.files.len(), 12);
    assert_eq!(summary.crds_copied, 0);
    for file in &OUTPUT_FILES {
        assert!(root.join(file.path).is_file(), "missing {}", file.path);
    }

    let crds = root.join("crds");
    assert!(crds.is_dir());
    assert_eq!(fs::read_dir(crds).unwrap().count(), 0);

    let chart = fs::read_to_string(root.join("Chart.yaml")).unwrap();
    assert!(chart.contains("appVersion: \"26.0.0\"\n"));
}

#[test]
fn test_rbac_names_are_rewritten_consistently() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("chart");
    let manifest = ManifestFixture::minimal()
        .with_role("keycloakrealmimportcontroller-role")
        .with_role_binding("keycloakrealmimportcontroller-role-binding", "Role", "keycloakrealmimportcontroller-role")
        .with_role_binding("keycloak-operator-view", "ClusterRole", "view")
        .bindings_first()
        .to_yaml();

    extract_and_generate(manifest.as_bytes(), &root, &[]).unwrap();

    let cluster_role = fs::read_to_string(root.join("templates/clusterrole.yaml")).unwrap();
    assert!(cluster_role.contains("  name: {{ include \"keycloak-operator.fullname\" . }}-cluster\n"));
    assert!(cluster_role.contains("rules:\n  - apiGroups:\n"));
    assert!(cluster_role.contains("apiextensions.k8s.io"));

    let cluster_binding = fs::read_to_string(root.join("templates/clusterrolebinding.yaml")).unwrap();
    assert!(cluster_binding.contains("-cluster-binding\n"));
    assert!(cluster_binding.contains("  name: {{ include \"keycloak-operator.fullname\" . }}-cluster\nsubjects:"));

    let role = fs::read_to_string(root.join("templates/role.yaml")).unwrap();
    assert!(role.contains("-realmimport-role\n"));

    let role_binding = fs::read_to_string(root.join("templates/rolebinding.yaml")).unwrap();
    assert!(role_binding.contains("  kind: Role\n  apiGroup: rbac.authorization.k8s.io\n  name: {{ include \"keycloak-operator.fullname\" . }}-realmimport-role\n"));
    assert!(role_binding.contains("  kind: ClusterRole\n  apiGroup: rbac.authorization.k8s.io\n  name: view\n"));
    assert_eq!(role_binding.matches("\n---\n").count(), 1);
}

#[test]
fn test_auxiliary_definitions_are_copied_verbatim() {
    let temp = TempDir::new().unwrap();
    let upstream = temp.path().join("upstream");
    fs::create_dir_all(&upstream).unwrap();
    let first = upstream.join("keycloaks.k8s.keycloak.org-v1.yml");
    let second = upstream.join("keycloakrealmimports.k8s.keycloak.org-v1.yml");
    let content = b"apiVersion: apiextensions.k8s.io/v1\nkind: CustomResourceDefinition\n# {{ not a template }}\n";
    fs::write(&first, content).unwrap();
    fs::write(&second, b"kind: CustomResourceDefinition\n").unwrap();
    let root = temp.path().join("chart");

    let summary = extract_and_generate(
        ManifestFixture::minimal().to_yaml().as_bytes(),
        &root,
        &[first, second],
    )
    .unwrap();

    assert_eq!(summary.crds_copied, 2);
    assert_eq!(fs::read(root.join("crds/keycloaks.k8s.keycloak.org-v1.yml")).unwrap(), content);
    assert!(root.join("crds/keycloakrealmimports.k8s.keycloak.org-v1.yml").is_file());
}

#[test]
fn test_missing_auxiliary_definition_names_the_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent-crd.yml");

    let err = extract_and_generate(
        ManifestFixture::minimal().to_yaml().as_bytes(),
        &temp.path().join("chart"),
        std::slice::from_ref(&missing),
    )
    .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Io);
    assert!(matches!(err, ChartError::Io { operation: FileOperation::Read, ref path, .. } if *path == missing));
    assert!(err.to_string().contains("absent-crd.yml"));
}

#[test]
fn test_structural_failures_leave_no_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("chart");

    let no_containers = "kind: Deployment\nmetadata:\n  name: keycloak-operator\nspec:\n  template:\n    spec:\n      containers: []\n";
    let err = extract_and_generate(no_containers.as_bytes(), &root, &[]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Structural);
    assert!(!root.exists());

    let malformed = "kind: Service\nspec: [unclosed\n";
    let err = extract_and_generate(malformed.as_bytes(), &root, &[]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Decode);
    assert!(!root.exists());
}

#[test]
fn test_unknown_kinds_are_ignored() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("chart");
    let manifest = ManifestFixture::minimal()
        .with_document("apiVersion: v1\nkind: ServiceAccount\nmetadata:\n  name: keycloak-operator\n")
        .to_yaml();

    let summary = extract_and_generate(manifest.as_bytes(), &root, &[]).unwrap();
    assert_eq!(summary.app_version, "26.0.0");
}
