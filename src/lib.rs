//! kdelta library
//!
//! Live Kubernetes resource tables with per-cell change tracking. The
//! binary is a thin headless front end over these modules.

pub mod cli;
pub mod config;
pub mod kube;
pub mod resource;
pub mod watcher;

// Re-export commonly used types for convenience
pub use resource::{
    ALL_NAMESPACES, AccessPolicy, AccessSpec, CLUSTER_SCOPE, Caller, Kind, KubeResource, List,
    Lister, Resource, ResourceError, RowEvent, Table, Verb, XRay,
};
pub use watcher::{ListOptions, ListWatcher, RefreshEvent, get_all_commands, new_list};
