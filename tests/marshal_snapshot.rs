//! Snapshot tests for normalized documents
//!
//! These tests use insta to pin the YAML view output.
//! Run `cargo insta review` to review and accept snapshot changes.

mod common;

use std::sync::Arc;

use common::{FakeCaller, role};
use insta::assert_snapshot;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::api::rbac::v1::Role;
use kdelta::{KubeResource, Resource};
use serde_json::json;

#[tokio::test]
async fn test_role_document() {
    let caller = Arc::new(FakeCaller::new(vec![role("blee", "fred")]));
    let r = KubeResource::<Role>::new(caller);

    let doc = r.marshal("blee/fred").await.unwrap();
    assert_snapshot!(doc, @r"
    typemeta:
      kind: Role
      apiversion: rbac.authorization.k8s.io/v1
    objectmeta:
      creationtimestamp: 2018-12-14T17:36:43Z
      name: fred
      namespace: blee
    rules: []
    ");
}

#[tokio::test]
async fn test_config_map_document_keeps_data_keys() {
    let caller = Arc::new(FakeCaller::new(vec![json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": "fred",
            "namespace": "blee",
            "labels": {"App": "fred"}
        },
        "data": {"Zorg": "1", "Blee": "2"}
    })]));
    let r = KubeResource::<ConfigMap>::new(caller);

    let doc = r.marshal("blee/fred").await.unwrap();
    assert_snapshot!(doc, @r"
    typemeta:
      kind: ConfigMap
      apiversion: v1
    objectmeta:
      labels:
        App: fred
      name: fred
      namespace: blee
    data:
      Blee: '2'
      Zorg: '1'
    ");
}

#[tokio::test]
async fn test_document_is_byte_stable() {
    let caller = Arc::new(FakeCaller::new(vec![role("blee", "fred")]));
    let r = KubeResource::<Role>::new(caller);

    let first = r.marshal("blee/fred").await.unwrap();
    let second = r.marshal("blee/fred").await.unwrap();
    assert_eq!(first, second);
}
