//! Workload kinds

use k8s_openapi::api::apps::v1::{Deployment, DeploymentStatus};

use super::{Kind, Properties, Row};

impl Kind for Deployment {
    const XRAY_COLUMNS: &'static [&'static str] = &["CONTAINER", "IMAGE", "PORTS"];

    fn columns() -> &'static [&'static str] {
        &["NAME", "DESIRED", "CURRENT", "UP-TO-DATE", "AVAILABLE"]
    }

    fn fields(&self) -> Row {
        let desired = self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(0);
        let status = self.status.as_ref();
        let count = |f: fn(&DeploymentStatus) -> Option<i32>| {
            status.and_then(f).unwrap_or(0).to_string()
        };

        vec![
            self.metadata.name.clone().unwrap_or_default(),
            desired.to_string(),
            count(|s| s.replicas),
            count(|s| s.updated_replicas),
            count(|s| s.available_replicas),
        ]
    }

    fn ext_fields(&self) -> Properties {
        let mut props = Properties::new();
        let Some(spec) = &self.spec else {
            return props;
        };

        if let Some(strategy) = spec.strategy.as_ref().and_then(|s| s.type_.clone()) {
            props.insert("Strategy".into(), strategy);
        }
        if let Some(labels) = &spec.selector.match_labels {
            let selector: Vec<String> =
                labels.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            props.insert("Selector".into(), selector.join(","));
        }
        props
    }

    /// One row per container of the pod template, init containers first
    fn xray(&self) -> Vec<Row> {
        let Some(pod) = self.spec.as_ref().and_then(|s| s.template.spec.as_ref()) else {
            return Vec::new();
        };

        pod.init_containers
            .iter()
            .flatten()
            .chain(&pod.containers)
            .map(|c| {
                let ports: Vec<String> = c
                    .ports
                    .iter()
                    .flatten()
                    .map(|p| p.container_port.to_string())
                    .collect();
                vec![
                    c.name.clone(),
                    c.image.clone().unwrap_or_default(),
                    ports.join(","),
                ]
            })
            .collect()
    }
}
