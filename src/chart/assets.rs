//! Chart file templates.
//!
//! Generator spans use `[[ … ]]` and `[% … %]`; everything in `{{ … }}` is
//! evaluated later by Helm and copied through as written.

pub const CHART_YAML: &str = r#"apiVersion: v2
name: keycloak-operator
description: Keycloak operator for Kubernetes
type: application
version: 0.1.0
appVersion: "[[ app_version ]]"
home: https://www.keycloak.org/operator/installation
sources:
  - https://github.com/keycloak/keycloak-k8s-resources
  - https://github.com/px3-dev/keycloak-operator
maintainers:
  - name: px3-dev
"#;

pub const VALUES_YAML: &str = r#"[% set requests = deployment.resources.requests -%]
[% set limits = deployment.resources.limits -%]
# Operator image
image:
  repository: [[ operator_image_repository ]]
  # Defaults to appVersion
  tag: ""
  pullPolicy: IfNotPresent

# Keycloak server image used by the operator when creating instances.
# The operator injects this as RELATED_IMAGE_KEYCLOAK.
keycloakImage:
  repository: [[ keycloak_image_repository ]]
  # Defaults to appVersion
  tag: ""

imagePullSecrets: []
nameOverride: ""
fullnameOverride: ""

replicas: [[ deployment.replicas ]]
[% if requests.cpu or requests.memory or limits.cpu or limits.memory %]
resources:
[%- if requests.cpu or requests.memory %]
  requests:
[%- if requests.cpu %]
    cpu: [[ requests.cpu ]]
[%- endif %]
[%- if requests.memory %]
    memory: [[ requests.memory ]]
[%- endif %]
[%- endif %]
[%- if limits.cpu or limits.memory %]
  limits:
[%- if limits.cpu %]
    cpu: [[ limits.cpu ]]
[%- endif %]
[%- if limits.memory %]
    memory: [[ limits.memory ]]
[%- endif %]
[%- endif %]
[%- else %]
resources: {}
[%- endif %]

serviceAccount:
  create: true
  annotations: {}
  # If not set and create is true, a name is generated using the fullname template.
  name: ""

service:
  type: [[ service.type ]]
  port: [[ service.port ]]

nodeSelector: {}
tolerations: []
affinity: {}
podAnnotations: {}
podLabels: {}
"#;

pub const HELMIGNORE: &str = r#"# Patterns to ignore when packaging Helm charts.
.DS_Store
.git/
.gitignore
*.swp
*.bak
*.tmp
*.orig
*~
.idea/
.vscode/
"#;

pub const HELPERS_TPL: &str = r#"{{/*
Expand the name of the chart.
*/}}
{{- define "keycloak-operator.name" -}}
{{- default .Chart.Name .Values.nameOverride | trunc 63 | trimSuffix "-" }}
{{- end }}

{{/*
Create a default fully qualified app name, truncated to 63 characters.
If the release name contains the chart name it is used as the full name.
*/}}
{{- define "keycloak-operator.fullname" -}}
{{- if .Values.fullnameOverride }}
{{- .Values.fullnameOverride | trunc 63 | trimSuffix "-" }}
{{- else }}
{{- $name := default .Chart.Name .Values.nameOverride }}
{{- if contains $name .Release.Name }}
{{- .Release.Name | trunc 63 | trimSuffix "-" }}
{{- else }}
{{- printf "%s-%s" .Release.Name $name | trunc 63 | trimSuffix "-" }}
{{- end }}
{{- end }}
{{- end }}

{{/*
Chart name and version as used by the chart label.
*/}}
{{- define "keycloak-operator.chart" -}}
{{- printf "%s-%s" .Chart.Name .Chart.Version | replace "+" "_" | trunc 63 | trimSuffix "-" }}
{{- end }}

{{/*
Common labels
*/}}
{{- define "keycloak-operator.labels" -}}
helm.sh/chart: {{ include "keycloak-operator.chart" . }}
{{ include "keycloak-operator.selectorLabels" . }}
{{- if .Chart.AppVersion }}
app.kubernetes.io/version: {{ .Chart.AppVersion | quote }}
{{- end }}
app.kubernetes.io/managed-by: {{ .Release.Service }}
{{- end }}

{{/*
Selector labels
*/}}
{{- define "keycloak-operator.selectorLabels" -}}
app.kubernetes.io/name: {{ include "keycloak-operator.name" . }}
app.kubernetes.io/instance: {{ .Release.Name }}
{{- end }}

{{/*
Name of the service account to use
*/}}
{{- define "keycloak-operator.serviceAccountName" -}}
{{- if .Values.serviceAccount.create }}
{{- default (include "keycloak-operator.fullname" .) .Values.serviceAccount.name }}
{{- else }}
{{- default "default" .Values.serviceAccount.name }}
{{- end }}
{{- end }}
"#;

pub const NOTES_TXT: &str = r#"Keycloak Operator {{ .Chart.AppVersion }} has been installed.

The operator is watching namespace {{ .Release.Namespace }} for Keycloak and KeycloakRealmImport resources.

To create a Keycloak instance, apply a Keycloak CR:

  kubectl apply -n {{ .Release.Namespace }} -f - <<EOF
  apiVersion: k8s.keycloak.org/v2alpha1
  kind: Keycloak
  metadata:
    name: my-keycloak
  spec:
    instances: 1
    hostname:
      hostname: my-keycloak.example.com
    http:
      tlsSecret: my-tls-secret
  EOF
"#;

pub const SERVICE_ACCOUNT_YAML: &str = r#"{{- if .Values.serviceAccount.create -}}
apiVersion: v1
kind: ServiceAccount
metadata:
  name: {{ include "keycloak-operator.serviceAccountName" . }}
  labels:
    {{- include "keycloak-operator.labels" . | nindent 4 }}
  {{- with .Values.serviceAccount.annotations }}
  annotations:
    {{- toYaml . | nindent 4 }}
  {{- end }}
{{- end }}
"#;

pub const DEPLOYMENT_YAML: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{ include "keycloak-operator.fullname" . }}
  labels:
    {{- include "keycloak-operator.labels" . | nindent 4 }}
spec:
  replicas: {{ .Values.replicas }}
  selector:
    matchLabels:
      {{- include "keycloak-operator.selectorLabels" . | nindent 6 }}
  template:
    metadata:
      {{- with .Values.podAnnotations }}
      annotations:
        {{- toYaml . | nindent 8 }}
      {{- end }}
      labels:
        {{- include "keycloak-operator.labels" . | nindent 8 }}
        {{- with .Values.podLabels }}
        {{- toYaml . | nindent 8 }}
        {{- end }}
    spec:
      {{- with .Values.imagePullSecrets }}
      imagePullSecrets:
        {{- toYaml . | nindent 8 }}
      {{- end }}
      serviceAccountName: {{ include "keycloak-operator.serviceAccountName" . }}
      containers:
        - name: [[ deployment.container_name ]]
          image: "{{ .Values.image.repository }}:{{ .Values.image.tag | default .Chart.AppVersion }}"
          imagePullPolicy: {{ .Values.image.pullPolicy }}
          env:
            - name: KUBERNETES_NAMESPACE
              valueFrom:
                fieldRef:
                  fieldPath: metadata.namespace
            - name: RELATED_IMAGE_KEYCLOAK
              value: "{{ .Values.keycloakImage.repository }}:{{ .Values.keycloakImage.tag | default .Chart.AppVersion }}"
[%- for env in deployment.extra_env %]
            - name: [[ env.name ]]
              value: [[ env.value | json_encode ]]
[%- endfor %]
[%- if deployment.container_port %]
          ports:
            - name: http
              containerPort: [[ deployment.container_port ]]
              protocol: TCP
[%- endif %]
[%- for kind in ["liveness", "readiness", "startup"] %]
[%- if deployment.probes[kind] %]
[%- set probe = deployment.probes[kind] %]
          [[ kind ]]Probe:
            httpGet:
              path: [[ probe.path ]]
              port: http
              scheme: HTTP
            failureThreshold: [[ probe.failure_threshold ]]
            initialDelaySeconds: [[ probe.initial_delay_seconds ]]
            periodSeconds: [[ probe.period_seconds ]]
            successThreshold: [[ probe.success_threshold ]]
            timeoutSeconds: [[ probe.timeout_seconds ]]
[%- endif %]
[%- endfor %]
          {{- with .Values.resources }}
          resources:
            {{- toYaml . | nindent 12 }}
          {{- end }}
      {{- with .Values.nodeSelector }}
      nodeSelector:
        {{- toYaml . | nindent 8 }}
      {{- end }}
      {{- with .Values.affinity }}
      affinity:
        {{- toYaml . | nindent 8 }}
      {{- end }}
      {{- with .Values.tolerations }}
      tolerations:
        {{- toYaml . | nindent 8 }}
      {{- end }}
"#;

pub const SERVICE_YAML: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: {{ include "keycloak-operator.fullname" . }}
  labels:
    {{- include "keycloak-operator.labels" . | nindent 4 }}
spec:
  type: {{ .Values.service.type }}
  ports:
    - port: {{ .Values.service.port }}
      targetPort: http
      protocol: TCP
      name: http
  selector:
    {{- include "keycloak-operator.selectorLabels" . | nindent 4 }}
"#;

pub const CLUSTER_ROLE_YAML: &str = r#"[%- for role in rbac.cluster_roles %]
[%- if not loop.first %]
---
[%- endif %]
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: {{ include "keycloak-operator.fullname" . }}-[[ role.suffix ]]
  labels:
    {{- include "keycloak-operator.labels" . | nindent 4 }}
rules:
[[ role.rules_yaml | reindent(width=2) ]]
[%- endfor %]
"#;

pub const CLUSTER_ROLE_BINDING_YAML: &str = r#"[%- for binding in rbac.cluster_role_bindings %]
[%- if not loop.first %]
---
[%- endif %]
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRoleBinding
metadata:
  name: {{ include "keycloak-operator.fullname" . }}-[[ binding.suffix ]]
  labels:
    {{- include "keycloak-operator.labels" . | nindent 4 }}
roleRef:
  kind: [[ binding.role_ref_kind ]]
  apiGroup: rbac.authorization.k8s.io
[%- if binding.is_builtin_role %]
  name: [[ binding.role_ref_name ]]
[%- else %]
  name: {{ include "keycloak-operator.fullname" . }}-[[ binding.role_suffix ]]
[%- endif %]
subjects:
  - kind: ServiceAccount
    name: {{ include "keycloak-operator.serviceAccountName" . }}
    namespace: {{ .Release.Namespace }}
[%- endfor %]
"#;

pub const ROLE_YAML: &str = r#"[%- for role in rbac.roles %]
[%- if not loop.first %]
---
[%- endif %]
apiVersion: rbac.authorization.k8s.io/v1
kind: Role
metadata:
  name: {{ include "keycloak-operator.fullname" . }}-[[ role.suffix ]]
  labels:
    {{- include "keycloak-operator.labels" . | nindent 4 }}
rules:
[[ role.rules_yaml | reindent(width=2) ]]
[%- endfor %]
"#;

pub const ROLE_BINDING_YAML: &str = r#"[%- for binding in rbac.role_bindings %]
[%- if not loop.first %]
---
[%- endif %]
apiVersion: rbac.authorization.k8s.io/v1
kind: RoleBinding
metadata:
  name: {{ include "keycloak-operator.fullname" . }}-[[ binding.suffix ]]
  labels:
    {{- include "keycloak-operator.labels" . | nindent 4 }}
roleRef:
[%- if binding.is_builtin_role %]
  kind: [[ binding.role_ref_kind ]]
  apiGroup: rbac.authorization.k8s.io
  name: [[ binding.role_ref_name ]]
[%- elif binding.role_ref_kind == "Role" %]
  kind: Role
  apiGroup: rbac.authorization.k8s.io
  name: {{ include "keycloak-operator.fullname" . }}-[[ binding.role_suffix ]]
[%- else %]
  kind: ClusterRole
  apiGroup: rbac.authorization.k8s.io
  name: {{ include "keycloak-operator.fullname" . }}-[[ binding.role_suffix ]]
[%- endif %]
subjects:
  - kind: ServiceAccount
    name: {{ include "keycloak-operator.serviceAccountName" . }}
[%- endfor %]
"#;
