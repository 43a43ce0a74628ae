//! Resource module
//!
//! The uniform contract every cluster-object kind implements, and the List
//! that keeps one kind's table current with per-cell change tracking.
//!
//! ## Adding a New Kind
//!
//! 1. Implement [`Kind`] for the k8s-openapi type (columns, fields, and any
//!    non-default access policy, X-ray flag or list fields).
//! 2. Add an entry to the registry in `src/watcher/registry.rs` and a match
//!    arm in `new_list`.
//!
//! Everything else (headers, age, row keys, deltas, describe, marshal) comes
//! from [`KubeResource`].

mod access;
mod age;
mod apps;
mod base;
mod corev1;
mod document;
mod error;
mod list;
mod rbac;
mod table;

pub use access::{AccessPolicy, AccessSpec, Verb};
pub use age::{UNKNOWN_AGE, format_age, to_age};
pub use base::{Kind, KubeResource};
pub use document::to_document;
pub use error::{BoxError, ResourceError, ResourceResult};
pub use list::{List, Lister};
pub use rbac::RULE_COLUMNS;
pub use table::{AGE_COLUMN, NAMESPACE_COLUMN, Row, RowEvent, RowKey, Table, XRay, delta_row};

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Scope value meaning "aggregate across every namespace".
///
/// Not a valid namespace name, so it can never collide with a real one.
pub const ALL_NAMESPACES: &str = "*";

/// Scope of cluster-wide kinds
pub const CLUSTER_SCOPE: &str = "";

/// Extended key/value properties shown in a detail view
pub type Properties = BTreeMap<String, String>;

/// Ordered properties returned by describe
pub type Description = Vec<(String, String)>;

pub fn is_all_namespaces(namespace: &str) -> bool {
    namespace == ALL_NAMESPACES
}

/// Split a `namespace/name` path. Paths without a namespace are cluster scoped.
pub fn namespaced(path: &str) -> (&str, &str) {
    match path.split_once('/') {
        Some((ns, name)) => (ns, name),
        None => (CLUSTER_SCOPE, path),
    }
}

/// Build the row key / path of an object
pub fn fqn(namespace: &str, name: &str) -> RowKey {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", namespace, name)
    }
}

/// Fetches raw records for one kind from the cluster.
///
/// Records are opaque to the engine; the bound [`Resource`] decodes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Caller: Send + Sync {
    /// Fetch a single object. `Ok(None)` means it does not exist.
    async fn get(&self, namespace: &str, name: &str) -> anyhow::Result<Option<Value>>;

    /// List every object in `namespace` (or all namespaces for the sentinel).
    async fn list(&self, namespace: &str) -> anyhow::Result<Vec<Value>>;
}

/// Capability set shared by every cluster-object kind
#[async_trait]
pub trait Resource: Sized + Send + Sync {
    /// Kind name, e.g. `Role`
    fn kind(&self) -> &'static str;

    /// Row key of the bound instance; empty when unbound
    fn path(&self) -> &str;

    fn is_namespaced(&self) -> bool;

    /// Whether the kind offers a drill-down view of related objects
    fn has_xray(&self) -> bool;

    fn access(&self) -> AccessPolicy;

    /// Column labels, with a leading NAMESPACE column under the all-namespaces scope
    fn header(&self, namespace: &str) -> Row;

    /// Display fields of the bound instance, aligned with [`Resource::header`]
    fn fields(&self, namespace: &str) -> Row;

    fn ext_fields(&self) -> Properties;

    /// Drill-down view of the bound instance; no rows when unbound
    fn xray(&self) -> XRay;

    /// Bind a new resource to one raw record
    fn new_instance(&self, raw: Value) -> ResourceResult<Self>;

    /// Raw records of every object in scope
    async fn list(&self, namespace: &str) -> ResourceResult<Vec<Value>>;

    /// Fetch and bind the object at `path`
    async fn get(&self, path: &str) -> ResourceResult<Self>;

    /// Fetch the object at `path` and render it as a normalized document
    async fn marshal(&self, path: &str) -> ResourceResult<String>;
}
