//! Generic resource adapter
//!
//! [`KubeResource`] implements the [`Resource`] contract once for every type
//! implementing [`Kind`]. A kind only describes its own columns; namespace
//! and age columns, row keys, fetching and marshalling are shared here.

use std::sync::Arc;

use async_trait::async_trait;
use k8s_openapi::Metadata;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::table::{AGE_COLUMN, NAMESPACE_COLUMN, blank_row};
use super::{
    AccessPolicy, Caller, Properties, Resource, ResourceError, ResourceResult, Row, XRay, fqn,
    is_all_namespaces, namespaced, to_age, to_document,
};

/// Kind-specific projection of a k8s-openapi object
pub trait Kind:
    k8s_openapi::Resource
    + Metadata<Ty = ObjectMeta>
    + Serialize
    + DeserializeOwned
    + Clone
    + Send
    + Sync
    + 'static
{
    /// False for cluster-wide kinds
    const NAMESPACED: bool = true;

    /// Columns of the drill-down view; empty for kinds without one
    const XRAY_COLUMNS: &'static [&'static str] = &[];

    const ACCESS: AccessPolicy = AccessPolicy::ALL_VERBS;

    /// Top-level fields always rendered as a list in documents
    const LIST_FIELDS: &'static [&'static str] = &[];

    /// Kind columns, excluding the NAMESPACE and AGE columns
    fn columns() -> &'static [&'static str];

    /// Values for [`Kind::columns`], in order
    fn fields(&self) -> Row;

    fn ext_fields(&self) -> Properties {
        Properties::new()
    }

    /// Rows of the drill-down view, aligned with [`Kind::XRAY_COLUMNS`]
    fn xray(&self) -> Vec<Row> {
        Vec::new()
    }
}

/// A resource of kind `K`, optionally bound to one decoded instance
pub struct KubeResource<K: Kind> {
    caller: Arc<dyn Caller>,
    instance: Option<K>,
    path: String,
}

impl<K: Kind> KubeResource<K> {
    /// An unbound resource fetching through `caller`
    pub fn new(caller: Arc<dyn Caller>) -> Self {
        Self {
            caller,
            instance: None,
            path: String::new(),
        }
    }

    pub fn instance(&self) -> Option<&K> {
        self.instance.as_ref()
    }

    fn decode(raw: Value) -> ResourceResult<K> {
        if !raw.is_object() {
            return Err(ResourceError::contract(
                K::KIND,
                format!("expected an object, got {}", raw),
            ));
        }
        if let Some(kind) = raw.get("kind").and_then(Value::as_str) {
            if kind != K::KIND {
                return Err(ResourceError::contract(
                    K::KIND,
                    format!("record of kind {} handed to {}", kind, K::KIND),
                ));
            }
        }

        serde_json::from_value(raw).map_err(|e| ResourceError::contract(K::KIND, e.to_string()))
    }

    async fn fetch(&self, path: &str) -> ResourceResult<Value> {
        let (ns, name) = namespaced(path);
        tracing::debug!("Fetching {} {}", K::KIND, path);

        self.caller
            .get(ns, name)
            .await
            .map_err(|e| ResourceError::fetch(K::KIND, ns, e))?
            .ok_or_else(|| ResourceError::not_found(K::KIND, path))
    }
}

impl<K: Kind> Clone for KubeResource<K> {
    fn clone(&self) -> Self {
        Self {
            caller: Arc::clone(&self.caller),
            instance: self.instance.clone(),
            path: self.path.clone(),
        }
    }
}

#[async_trait]
impl<K: Kind> Resource for KubeResource<K> {
    fn kind(&self) -> &'static str {
        K::KIND
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn is_namespaced(&self) -> bool {
        K::NAMESPACED
    }

    fn has_xray(&self) -> bool {
        !K::XRAY_COLUMNS.is_empty()
    }

    fn access(&self) -> AccessPolicy {
        K::ACCESS
    }

    fn header(&self, namespace: &str) -> Row {
        let mut header = Row::with_capacity(K::columns().len() + 2);
        if is_all_namespaces(namespace) {
            header.push(NAMESPACE_COLUMN.to_string());
        }
        header.extend(K::columns().iter().map(|c| c.to_string()));
        header.push(AGE_COLUMN.to_string());
        header
    }

    fn fields(&self, namespace: &str) -> Row {
        let Some(obj) = &self.instance else {
            return blank_row(self.header(namespace).len());
        };
        let meta = obj.metadata();

        let mut row = Row::with_capacity(K::columns().len() + 2);
        if is_all_namespaces(namespace) {
            row.push(meta.namespace.clone().unwrap_or_default());
        }
        row.extend(obj.fields());
        row.push(to_age(meta.creation_timestamp.as_ref()));
        row
    }

    fn ext_fields(&self) -> Properties {
        self.instance
            .as_ref()
            .map(Kind::ext_fields)
            .unwrap_or_default()
    }

    fn xray(&self) -> XRay {
        XRay {
            header: K::XRAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: self.instance.as_ref().map(Kind::xray).unwrap_or_default(),
        }
    }

    fn new_instance(&self, raw: Value) -> ResourceResult<Self> {
        let obj = Self::decode(raw)?;
        let meta = obj.metadata();
        let path = fqn(
            meta.namespace.as_deref().unwrap_or_default(),
            meta.name.as_deref().unwrap_or_default(),
        );

        Ok(Self {
            caller: Arc::clone(&self.caller),
            instance: Some(obj),
            path,
        })
    }

    async fn list(&self, namespace: &str) -> ResourceResult<Vec<Value>> {
        self.caller
            .list(namespace)
            .await
            .map_err(|e| ResourceError::fetch(K::KIND, namespace, e))
    }

    async fn get(&self, path: &str) -> ResourceResult<Self> {
        let raw = self.fetch(path).await?;
        self.new_instance(raw)
    }

    async fn marshal(&self, path: &str) -> ResourceResult<String> {
        let bound = self.get(path).await?;
        let Some(obj) = bound.instance else {
            return Err(ResourceError::not_found(K::KIND, path));
        };

        let value =
            serde_json::to_value(&obj).map_err(|e| ResourceError::encoding(K::KIND, path, e))?;
        to_document(&value, K::KIND, K::API_VERSION, K::LIST_FIELDS)
            .map_err(|e| ResourceError::encoding(K::KIND, path, e))
    }
}
