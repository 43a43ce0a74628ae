//! Access-control kinds

use k8s_openapi::api::rbac::v1::{
    ClusterRole, ClusterRoleBinding, PolicyRule, Role, RoleBinding, RoleRef, Subject,
};

use super::{Kind, Properties, Row};

const BINDING_COLUMNS: &[&str] = &["NAME", "ROLE", "KIND", "SUBJECTS"];

/// Columns of the policy rule breakdown of roles
pub const RULE_COLUMNS: &[&str] = &["RESOURCES", "API-GROUPS", "VERBS"];

/// Display name of the empty API group
const CORE_GROUP: &str = "core";

impl Kind for Role {
    const XRAY_COLUMNS: &'static [&'static str] = RULE_COLUMNS;
    const LIST_FIELDS: &'static [&'static str] = &["rules"];

    fn columns() -> &'static [&'static str] {
        &["NAME"]
    }

    fn fields(&self) -> Row {
        vec![self.metadata.name.clone().unwrap_or_default()]
    }

    fn xray(&self) -> Vec<Row> {
        rule_rows(self.rules.as_deref())
    }
}

impl Kind for ClusterRole {
    const NAMESPACED: bool = false;
    const XRAY_COLUMNS: &'static [&'static str] = RULE_COLUMNS;
    const LIST_FIELDS: &'static [&'static str] = &["rules"];

    fn columns() -> &'static [&'static str] {
        &["NAME"]
    }

    fn fields(&self) -> Row {
        vec![self.metadata.name.clone().unwrap_or_default()]
    }

    fn ext_fields(&self) -> Properties {
        let mut props = Properties::new();
        if let Some(rule) = &self.aggregation_rule {
            let selectors = rule.cluster_role_selectors.as_ref().map_or(0, Vec::len);
            props.insert("Aggregated".into(), format!("{} selector(s)", selectors));
        }
        props
    }

    fn xray(&self) -> Vec<Row> {
        rule_rows(self.rules.as_deref())
    }
}

impl Kind for RoleBinding {
    const LIST_FIELDS: &'static [&'static str] = &["subjects"];

    fn columns() -> &'static [&'static str] {
        BINDING_COLUMNS
    }

    fn fields(&self) -> Row {
        binding_fields(
            self.metadata.name.as_deref(),
            &self.role_ref,
            self.subjects.as_deref(),
        )
    }

    fn ext_fields(&self) -> Properties {
        binding_ext_fields(&self.role_ref, self.subjects.as_deref())
    }
}

impl Kind for ClusterRoleBinding {
    const NAMESPACED: bool = false;
    const LIST_FIELDS: &'static [&'static str] = &["subjects"];

    fn columns() -> &'static [&'static str] {
        BINDING_COLUMNS
    }

    fn fields(&self) -> Row {
        binding_fields(
            self.metadata.name.as_deref(),
            &self.role_ref,
            self.subjects.as_deref(),
        )
    }

    fn ext_fields(&self) -> Properties {
        binding_ext_fields(&self.role_ref, self.subjects.as_deref())
    }
}

fn binding_fields(name: Option<&str>, role_ref: &RoleRef, subjects: Option<&[Subject]>) -> Row {
    let subjects = subjects.unwrap_or_default();
    let kinds: Vec<&str> = subjects.iter().map(|s| subject_kind(&s.kind)).collect();
    let names: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();

    vec![
        name.unwrap_or_default().to_string(),
        role_ref.name.clone(),
        kinds.join(","),
        names.join(","),
    ]
}

fn binding_ext_fields(role_ref: &RoleRef, subjects: Option<&[Subject]>) -> Properties {
    let mut props = Properties::new();
    props.insert(
        "RoleRef".into(),
        format!("{}/{}", role_ref.kind, role_ref.name),
    );
    for subject in subjects.unwrap_or_default() {
        let name = match &subject.namespace {
            Some(ns) if !ns.is_empty() => format!("{}/{}", ns, subject.name),
            _ => subject.name.clone(),
        };
        props.insert(format!("Subject {}", name), subject.kind.clone());
    }
    props
}

/// One row per policy rule. Non-resource rules list their URLs as resources.
fn rule_rows(rules: Option<&[PolicyRule]>) -> Vec<Row> {
    rules
        .unwrap_or_default()
        .iter()
        .map(|rule| {
            let resources = match rule.resources.as_deref() {
                Some(resources) if !resources.is_empty() => {
                    qualified_resources(resources, rule.resource_names.as_deref())
                }
                _ => rule.non_resource_urls.clone().unwrap_or_default(),
            };
            let groups: Vec<&str> = rule
                .api_groups
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|g| if g.is_empty() { CORE_GROUP } else { g.as_str() })
                .collect();

            vec![resources.join(","), groups.join(","), rule.verbs.join(",")]
        })
        .collect()
}

fn qualified_resources(resources: &[String], names: Option<&[String]>) -> Vec<String> {
    match names {
        Some(names) if !names.is_empty() => resources
            .iter()
            .flat_map(|r| names.iter().map(move |n| format!("{}/{}", r, n)))
            .collect(),
        _ => resources.to_vec(),
    }
}

fn subject_kind(kind: &str) -> &str {
    match kind {
        "User" => "USR",
        "Group" => "GRP",
        "ServiceAccount" => "SA",
        other => other,
    }
}
