//! kube-rs backed callers
//!
//! Fetch typed objects through `Api<K>` and hand them to the engine as raw
//! JSON records. Every request carries a deadline; a timeout surfaces as an
//! ordinary fetch error.

use std::fmt::Debug;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use kube::api::ListParams;
use kube::core::{ClusterResourceScope, NamespaceResourceScope};
use kube::{Api, Client};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::resource::{Caller, is_all_namespaces};

/// Default per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Caller for namespaced kinds
pub struct NamespacedCaller<K> {
    client: Client,
    timeout: Duration,
    _kind: PhantomData<fn() -> K>,
}

impl<K> NamespacedCaller<K> {
    pub fn new(client: Client) -> Self {
        Self::with_timeout(client, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<K> Caller for NamespacedCaller<K>
where
    K: kube::Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + DeserializeOwned
        + Serialize
        + Send
        + Sync
        + 'static,
{
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<Value>> {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let obj = with_deadline(self.timeout, api.get_opt(name)).await?;
        Ok(obj.map(|o| serde_json::to_value(&o)).transpose()?)
    }

    async fn list(&self, namespace: &str) -> Result<Vec<Value>> {
        let api: Api<K> = if is_all_namespaces(namespace) {
            Api::all(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        };
        let list = with_deadline(self.timeout, api.list(&ListParams::default())).await?;
        to_values(&list.items)
    }
}

/// Caller for cluster-wide kinds; namespaces are ignored
pub struct ClusterCaller<K> {
    client: Client,
    timeout: Duration,
    _kind: PhantomData<fn() -> K>,
}

impl<K> ClusterCaller<K> {
    pub fn new(client: Client) -> Self {
        Self::with_timeout(client, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<K> Caller for ClusterCaller<K>
where
    K: kube::Resource<Scope = ClusterResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + DeserializeOwned
        + Serialize
        + Send
        + Sync
        + 'static,
{
    async fn get(&self, _namespace: &str, name: &str) -> Result<Option<Value>> {
        let api: Api<K> = Api::all(self.client.clone());
        let obj = with_deadline(self.timeout, api.get_opt(name)).await?;
        Ok(obj.map(|o| serde_json::to_value(&o)).transpose()?)
    }

    async fn list(&self, _namespace: &str) -> Result<Vec<Value>> {
        let api: Api<K> = Api::all(self.client.clone());
        let list = with_deadline(self.timeout, api.list(&ListParams::default())).await?;
        to_values(&list.items)
    }
}

async fn with_deadline<T, F>(timeout: Duration, request: F) -> Result<T>
where
    F: Future<Output = kube::Result<T>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(anyhow::anyhow!("request timed out after {:?}", timeout)),
    }
}

fn to_values<K: Serialize>(items: &[K]) -> Result<Vec<Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_expires() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, kube::Error>(())
        };
        let err = with_deadline(Duration::from_millis(10), slow)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_deadline_passes_result_through() {
        let fast = async { Ok::<_, kube::Error>(7) };
        assert_eq!(with_deadline(DEFAULT_REQUEST_TIMEOUT, fast).await.unwrap(), 7);
    }
}
