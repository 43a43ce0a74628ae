//! Core API group kinds

use k8s_openapi::api::core::v1::{ConfigMap, Event, Namespace, Secret, ServiceAccount};

use super::{AccessPolicy, Kind, Properties, Row};

impl Kind for Secret {
    fn columns() -> &'static [&'static str] {
        &["NAME", "TYPE", "DATA"]
    }

    fn fields(&self) -> Row {
        vec![
            self.metadata.name.clone().unwrap_or_default(),
            self.type_.clone().unwrap_or_default(),
            self.data.as_ref().map_or(0, |d| d.len()).to_string(),
        ]
    }

    fn ext_fields(&self) -> Properties {
        let mut props = Properties::new();
        if let Some(data) = &self.data {
            let keys: Vec<&str> = data.keys().map(String::as_str).collect();
            props.insert("Keys".into(), keys.join(","));
        }
        props
    }
}

impl Kind for ConfigMap {
    fn columns() -> &'static [&'static str] {
        &["NAME", "DATA"]
    }

    fn fields(&self) -> Row {
        let count = self.data.as_ref().map_or(0, |d| d.len())
            + self.binary_data.as_ref().map_or(0, |d| d.len());
        vec![
            self.metadata.name.clone().unwrap_or_default(),
            count.to_string(),
        ]
    }
}

impl Kind for ServiceAccount {
    const LIST_FIELDS: &'static [&'static str] = &["secrets"];

    fn columns() -> &'static [&'static str] {
        &["NAME", "SECRETS"]
    }

    fn fields(&self) -> Row {
        vec![
            self.metadata.name.clone().unwrap_or_default(),
            self.secrets.as_ref().map_or(0, Vec::len).to_string(),
        ]
    }

    fn ext_fields(&self) -> Properties {
        let mut props = Properties::new();
        if let Some(pull) = &self.image_pull_secrets {
            props.insert("ImagePullSecrets".into(), pull.len().to_string());
        }
        if let Some(automount) = self.automount_service_account_token {
            props.insert("AutomountToken".into(), automount.to_string());
        }
        props
    }
}

impl Kind for Namespace {
    const NAMESPACED: bool = false;

    fn columns() -> &'static [&'static str] {
        &["NAME", "STATUS"]
    }

    fn fields(&self) -> Row {
        vec![
            self.metadata.name.clone().unwrap_or_default(),
            self.status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_default(),
        ]
    }
}

impl Kind for Event {
    const ACCESS: AccessPolicy = AccessPolicy::READ_ONLY;

    fn columns() -> &'static [&'static str] {
        &["NAME", "REASON", "SOURCE", "COUNT"]
    }

    fn fields(&self) -> Row {
        vec![
            self.metadata.name.clone().unwrap_or_default(),
            self.reason.clone().unwrap_or_default(),
            self.source
                .as_ref()
                .and_then(|s| s.component.clone())
                .unwrap_or_default(),
            self.count.unwrap_or(0).to_string(),
        ]
    }

    fn ext_fields(&self) -> Properties {
        let mut props = Properties::new();
        let object = &self.involved_object;
        props.insert(
            "Object".into(),
            format!(
                "{}/{}",
                object.kind.as_deref().unwrap_or_default(),
                object.name.as_deref().unwrap_or_default()
            ),
        );
        if let Some(message) = &self.message {
            props.insert("Message".into(), message.clone());
        }
        if let Some(type_) = &self.type_ {
            props.insert("Type".into(), type_.clone());
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secret_fields() {
        let secret: Secret = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {"name": "fred", "namespace": "blee"},
            "type": "kubernetes.io/tls",
            "data": {"tls.crt": "Zm9v", "tls.key": "YmFy"}
        }))
        .unwrap();

        assert_eq!(secret.fields(), vec!["fred", "kubernetes.io/tls", "2"]);
        assert_eq!(
            secret.ext_fields().get("Keys").map(String::as_str),
            Some("tls.crt,tls.key")
        );
    }

    #[test]
    fn test_configmap_counts_binary_data() {
        let cm: ConfigMap = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "fred"},
            "data": {"a": "1"},
            "binaryData": {"b": "Zm9v"}
        }))
        .unwrap();

        assert_eq!(cm.fields(), vec!["fred", "2"]);
    }

    #[test]
    fn test_event_is_read_only() {
        assert!(Event::ACCESS.is_read_only());
        let event: Event = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Event",
            "metadata": {"name": "fred.17a", "namespace": "blee"},
            "involvedObject": {"kind": "Pod", "name": "fred"},
            "reason": "BackOff",
            "source": {"component": "kubelet"},
            "count": 3,
            "message": "Back-off restarting failed container"
        }))
        .unwrap();

        assert_eq!(event.fields(), vec!["fred.17a", "BackOff", "kubelet", "3"]);
        assert_eq!(event.ext_fields().get("Object").map(String::as_str), Some("Pod/fred"));
    }

    #[test]
    fn test_namespace_status() {
        let ns: Namespace = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": {"name": "blee"},
            "status": {"phase": "Active"}
        }))
        .unwrap();

        assert_eq!(ns.fields(), vec!["blee", "Active"]);
        assert!(!Namespace::NAMESPACED);
    }
}
