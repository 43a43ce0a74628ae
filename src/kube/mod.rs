//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides the
//! kube-rs backed callers used by resource lists.

mod caller;

pub use caller::{ClusterCaller, DEFAULT_REQUEST_TIMEOUT, NamespacedCaller};

use anyhow::{Context, Result};
use kube::config::Kubeconfig;
use kube::{Client, Config};

use crate::resource::ALL_NAMESPACES;

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer()
        .await
        .context("Failed to infer Kubernetes configuration")?;
    tracing::debug!("Connecting to cluster at {}", config.cluster_url);

    Client::try_from(config).context("Failed to create Kubernetes client")
}

/// Get the current Kubernetes context name
pub fn get_context() -> Result<String> {
    let kubeconfig = Kubeconfig::read().context("Failed to read kubeconfig")?;
    Ok(kubeconfig
        .current_context
        .unwrap_or_else(|| "default".to_string()))
}

/// Resolve the namespace scope to list in
///
/// An explicit namespace wins over the configured default; `all_namespaces`
/// wins over both. `-A` and `*` in either source also mean every namespace.
pub fn resolve_namespace(
    all_namespaces: bool,
    namespace: Option<&str>,
    configured: &str,
) -> String {
    if all_namespaces {
        return ALL_NAMESPACES.to_string();
    }

    let ns = namespace.unwrap_or(configured);
    match ns {
        "-A" | ALL_NAMESPACES => ALL_NAMESPACES.to_string(),
        "" => "default".to_string(),
        other => other.to_string(),
    }
}
