//! Pure string helpers used while extracting: image reference splitting and
//! short-suffix derivation for RBAC resource names.

/// Name-prefix rewrites, tried in order; the first match wins.
const SUFFIX_REWRITES: &[(&str, &str)] = &[
    ("keycloak-operator-", ""),
    ("keycloakrealmimportcontroller-", "realmimport-"),
    ("keycloakcontroller-", "keycloak-"),
];

/// Split `repository:tag` on the last colon.
///
/// A reference without a colon is all repository, with an empty tag.
///
/// ```
/// use kube_chartgen::extract::split_image;
///
/// assert_eq!(
///     split_image("quay.io/keycloak/keycloak-operator:26.0.0"),
///     ("quay.io/keycloak/keycloak-operator", "26.0.0")
/// );
/// assert_eq!(split_image("busybox"), ("busybox", ""));
/// ```
pub fn split_image(reference: &str) -> (&str, &str) {
    match reference.rsplit_once(':') {
        Some((repository, tag)) => (repository, tag),
        None => (reference, ""),
    }
}

/// Derive the short suffix a managed RBAC resource is named with in the chart.
///
/// Depends on `name` alone. Names matching none of the known prefixes are
/// returned unchanged.
///
/// ```
/// use kube_chartgen::extract::derive_suffix;
///
/// assert_eq!(derive_suffix("keycloak-operator-cluster"), "cluster");
/// assert_eq!(derive_suffix("keycloakrealmimportcontroller-bar"), "realmimport-bar");
/// assert_eq!(derive_suffix("unrelated-name"), "unrelated-name");
/// ```
pub fn derive_suffix(name: &str) -> String {
    for (prefix, replacement) in SUFFIX_REWRITES {
        if let Some(rest) = name.strip_prefix(prefix) {
            let suffix = format!("{replacement}{rest}");
            return suffix.strip_prefix('-').map(str::to_string).unwrap_or(suffix);
        }
    }
    name.to_string()
}
