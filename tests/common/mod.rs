//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use kdelta::Caller;
use serde_json::{Value, json};

pub const CREATED: &str = "2018-12-14T17:36:43Z";

/// In-memory cluster: `list` returns the current records, `get` looks one up
#[derive(Default)]
pub struct FakeCaller {
    records: Mutex<Vec<Value>>,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
}

impl FakeCaller {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    /// Replace what the next list returns
    pub fn set(&self, records: Vec<Value>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Caller for FakeCaller {
    async fn get(&self, namespace: &str, name: &str) -> anyhow::Result<Option<Value>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| {
                r["metadata"]["name"] == name
                    && r["metadata"]["namespace"].as_str().unwrap_or("") == namespace
            })
            .cloned())
    }

    async fn list(&self, namespace: &str) -> anyhow::Result<Vec<Value>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| {
                namespace == kdelta::ALL_NAMESPACES
                    || r["metadata"]["namespace"].as_str().unwrap_or("") == namespace
            })
            .cloned()
            .collect())
    }
}

pub fn role(namespace: &str, name: &str) -> Value {
    json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "Role",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "creationTimestamp": CREATED
        }
    })
}

pub fn config_map(namespace: &str, name: &str, keys: usize) -> Value {
    let data: serde_json::Map<String, Value> =
        (0..keys).map(|i| (format!("k{}", i), json!("v"))).collect();
    json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "creationTimestamp": CREATED
        },
        "data": data
    })
}
