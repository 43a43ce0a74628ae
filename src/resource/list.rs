//! Reconciliation and delta engine
//!
//! A [`List`] keeps the table of one kind in one namespace current. Each
//! reconciliation builds a complete new [`Table`] before publishing it, so
//! readers only ever see whole snapshots.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use super::{
    AccessPolicy, AccessSpec, CLUSTER_SCOPE, Description, Resource, ResourceError,
    ResourceResult, Table, XRay,
};

/// View-layer facade over a [`List`] of any kind
#[async_trait]
pub trait Lister: Send + Sync {
    fn kind(&self) -> &'static str;

    /// Bound namespace scope, possibly the all-namespaces sentinel
    fn namespace(&self) -> &str;

    /// Current snapshot
    fn data(&self) -> Arc<Table>;

    /// Snapshot that was current before the last reconciliation
    fn previous(&self) -> Arc<Table>;

    fn has_xray(&self) -> bool;

    fn access(&self) -> AccessSpec;

    /// Fetch, diff and publish a new snapshot
    async fn reconcile(&self) -> ResourceResult<()>;

    /// Header/field pairs of one object followed by its extended fields
    async fn describe(&self, path: &str) -> ResourceResult<Description>;

    async fn marshal(&self, path: &str) -> ResourceResult<String>;

    /// Drill-down view of one object, for kinds advertising X-ray
    async fn xray(&self, path: &str) -> ResourceResult<XRay>;
}

struct Snapshots {
    previous: Arc<Table>,
    current: Arc<Table>,
}

/// Reconciled table of one resource kind in one namespace
pub struct List<R: Resource> {
    namespace: String,
    resource: R,
    policy: AccessPolicy,
    snapshots: RwLock<Snapshots>,
    in_flight: tokio::sync::Mutex<()>,
}

impl<R: Resource> List<R> {
    /// Create a list for `resource` scoped to `namespace`.
    ///
    /// Cluster-wide kinds ignore the namespace.
    pub fn new(namespace: impl Into<String>, resource: R) -> Self {
        let namespace = if resource.is_namespaced() {
            namespace.into()
        } else {
            CLUSTER_SCOPE.to_string()
        };
        let empty = Arc::new(Table::new(
            namespace.clone(),
            resource.header(&namespace),
        ));

        Self {
            policy: resource.access(),
            namespace,
            resource,
            snapshots: RwLock::new(Snapshots {
                previous: Arc::clone(&empty),
                current: empty,
            }),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Restrict the advertised verbs to read-only
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.policy = self.policy.clamp(read_only);
        self
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    fn publish(&self, table: Table) {
        let mut snapshots = self
            .snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut snapshots.current, Arc::new(table));
        snapshots.previous = previous;
    }
}

#[async_trait]
impl<R: Resource + 'static> Lister for List<R> {
    fn kind(&self) -> &'static str {
        self.resource.kind()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn data(&self) -> Arc<Table> {
        let snapshots = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&snapshots.current)
    }

    fn previous(&self) -> Arc<Table> {
        let snapshots = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&snapshots.previous)
    }

    fn has_xray(&self) -> bool {
        self.resource.has_xray()
    }

    fn access(&self) -> AccessSpec {
        AccessSpec::new(self.resource.kind(), &self.namespace, self.policy)
    }

    async fn reconcile(&self) -> ResourceResult<()> {
        let _in_flight = self.in_flight.lock().await;
        let kind = self.resource.kind();

        let raws = self.resource.list(&self.namespace).await.inspect_err(|e| {
            tracing::warn!("{} reconcile in {:?} failed: {}", kind, self.namespace, e);
        })?;

        let header = self.resource.header(&self.namespace);
        let mut rows = BTreeMap::new();
        for raw in raws {
            let res = self.resource.new_instance(raw).inspect_err(|e| {
                tracing::error!("{} reconcile aborted: {}", kind, e);
            })?;

            let fields = res.fields(&self.namespace);
            if fields.len() != header.len() {
                let err = ResourceError::contract(
                    kind,
                    format!(
                        "{} has {} fields for {} columns",
                        res.path(),
                        fields.len(),
                        header.len()
                    ),
                );
                tracing::error!("{} reconcile aborted: {}", kind, err);
                return Err(err);
            }

            if rows.insert(res.path().to_string(), fields).is_some() {
                tracing::warn!("{} listing returned {} more than once", kind, res.path());
            }
        }

        let table = Table::reconcile(self.namespace.clone(), header, rows, &self.data());
        tracing::debug!(
            "{} reconciled in {:?}: {} rows, {} changed",
            kind,
            self.namespace,
            table.len(),
            table.changed_rows().count()
        );
        self.publish(table);

        Ok(())
    }

    async fn describe(&self, path: &str) -> ResourceResult<Description> {
        let res = self.resource.get(path).await?;

        let mut props: Description = res
            .header(&self.namespace)
            .into_iter()
            .zip(res.fields(&self.namespace))
            .collect();
        props.extend(res.ext_fields());

        Ok(props)
    }

    async fn marshal(&self, path: &str) -> ResourceResult<String> {
        self.resource.marshal(path).await
    }

    async fn xray(&self, path: &str) -> ResourceResult<XRay> {
        if !self.resource.has_xray() {
            return Err(ResourceError::unsupported(self.resource.kind(), "xray"));
        }

        let res = self.resource.get(path).await?;
        Ok(res.xray())
    }
}
