//! Kind registry
//!
//! Maps command aliases to supported kinds and builds lists for them.
//!
//! To add a new kind:
//! 1. Implement `Kind` for it under `src/resource/`
//! 2. Add an entry here with display name and command aliases
//! 3. Add the match arm in `new_list()`

use std::sync::Arc;
use std::time::Duration;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Event, Namespace, Secret, ServiceAccount};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding};
use kube::Client;

use crate::kube::{ClusterCaller, DEFAULT_REQUEST_TIMEOUT, NamespacedCaller};
use crate::resource::{Kind, KubeResource, List, Lister};

/// Registry entry for a supported kind
pub struct ResourceEntry {
    pub display_name: &'static str,
    pub command_aliases: &'static [&'static str],
    pub namespaced: bool,
}

/// Registry of all supported kinds
pub const RESOURCE_REGISTRY: &[ResourceEntry] = &[
    // Access control
    ResourceEntry {
        display_name: "Role",
        command_aliases: &["role", "roles", "ro"],
        namespaced: <Role as Kind>::NAMESPACED,
    },
    ResourceEntry {
        display_name: "ClusterRole",
        command_aliases: &["clusterrole", "clusterroles", "cr"],
        namespaced: <ClusterRole as Kind>::NAMESPACED,
    },
    ResourceEntry {
        display_name: "RoleBinding",
        command_aliases: &["rolebinding", "rolebindings", "rb"],
        namespaced: <RoleBinding as Kind>::NAMESPACED,
    },
    ResourceEntry {
        display_name: "ClusterRoleBinding",
        command_aliases: &["clusterrolebinding", "clusterrolebindings", "crb"],
        namespaced: <ClusterRoleBinding as Kind>::NAMESPACED,
    },
    ResourceEntry {
        display_name: "ServiceAccount",
        command_aliases: &["serviceaccount", "serviceaccounts", "sa"],
        namespaced: <ServiceAccount as Kind>::NAMESPACED,
    },
    // Configuration
    ResourceEntry {
        display_name: "Secret",
        command_aliases: &["secret", "secrets", "sec"],
        namespaced: <Secret as Kind>::NAMESPACED,
    },
    ResourceEntry {
        display_name: "ConfigMap",
        command_aliases: &["configmap", "configmaps", "cm"],
        namespaced: <ConfigMap as Kind>::NAMESPACED,
    },
    // Workloads
    ResourceEntry {
        display_name: "Deployment",
        command_aliases: &["deployment", "deployments", "deploy", "dp"],
        namespaced: <Deployment as Kind>::NAMESPACED,
    },
    // Cluster
    ResourceEntry {
        display_name: "Namespace",
        command_aliases: &["namespace", "namespaces", "ns"],
        namespaced: <Namespace as Kind>::NAMESPACED,
    },
    ResourceEntry {
        display_name: "Event",
        command_aliases: &["event", "events", "ev"],
        namespaced: <Event as Kind>::NAMESPACED,
    },
];

/// Get display name for a command alias
pub fn get_display_name_for_command(cmd: &str) -> Option<&'static str> {
    let cmd_lower = cmd.to_lowercase();
    RESOURCE_REGISTRY
        .iter()
        .find(|entry| entry.command_aliases.iter().any(|&alias| alias == cmd_lower))
        .map(|entry| entry.display_name)
}

/// Get all command aliases for help text
pub fn get_all_commands() -> Vec<(&'static str, &'static [&'static str])> {
    RESOURCE_REGISTRY
        .iter()
        .map(|e| (e.display_name, e.command_aliases))
        .collect()
}

/// Settings applied to every list built by [`new_list`]
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub read_only: bool,
    pub request_timeout: Duration,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            read_only: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Build a list for the kind named by `cmd`, or `None` for unknown aliases
pub fn new_list(
    cmd: &str,
    client: &Client,
    namespace: &str,
    opts: &ListOptions,
) -> Option<Arc<dyn Lister>> {
    macro_rules! list_for {
        ($type:ty, $caller:ident) => {{
            let caller = $caller::<$type>::with_timeout(client.clone(), opts.request_timeout);
            let list = List::new(namespace, KubeResource::<$type>::new(Arc::new(caller)))
                .with_read_only(opts.read_only);
            Some(Arc::new(list) as Arc<dyn Lister>)
        }};
    }

    match get_display_name_for_command(cmd)? {
        "Role" => list_for!(Role, NamespacedCaller),
        "ClusterRole" => list_for!(ClusterRole, ClusterCaller),
        "RoleBinding" => list_for!(RoleBinding, NamespacedCaller),
        "ClusterRoleBinding" => list_for!(ClusterRoleBinding, ClusterCaller),
        "ServiceAccount" => list_for!(ServiceAccount, NamespacedCaller),
        "Secret" => list_for!(Secret, NamespacedCaller),
        "ConfigMap" => list_for!(ConfigMap, NamespacedCaller),
        "Deployment" => list_for!(Deployment, NamespacedCaller),
        "Namespace" => list_for!(Namespace, ClusterCaller),
        "Event" => list_for!(Event, NamespacedCaller),
        other => {
            tracing::warn!("No list constructor registered for {}", other);
            None
        }
    }
}
