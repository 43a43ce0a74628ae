//! Delta computation across reconciliation cycles

mod common;

use std::sync::Arc;

use common::{FakeCaller, config_map};
use k8s_openapi::api::core::v1::ConfigMap;
use kdelta::{ALL_NAMESPACES, KubeResource, List, Lister};

fn cm_list(namespace: &str, caller: Arc<FakeCaller>) -> List<KubeResource<ConfigMap>> {
    List::new(namespace, KubeResource::<ConfigMap>::new(caller))
}

#[tokio::test]
async fn test_unchanged_cluster_yields_no_deltas() {
    let caller = Arc::new(FakeCaller::new(vec![
        config_map("blee", "fred", 1),
        config_map("blee", "zorg", 2),
    ]));
    let l = cm_list("blee", caller);

    l.reconcile().await.unwrap();
    let first = l.data();
    l.reconcile().await.unwrap();
    let second = l.data();

    assert_eq!(first.len(), 2);
    assert_eq!(first.rows.keys().collect::<Vec<_>>(), second.rows.keys().collect::<Vec<_>>());
    for (key, row) in &second.rows {
        assert_eq!(row.fields, first.rows[key].fields);
        assert!(!row.has_deltas(), "{} should be unchanged", key);
    }
}

#[tokio::test]
async fn test_changed_field_records_prior_value() {
    let caller = Arc::new(FakeCaller::new(vec![config_map("blee", "fred", 0)]));
    let l = cm_list("blee", caller.clone());

    l.reconcile().await.unwrap();
    caller.set(vec![config_map("blee", "fred", 1)]);
    l.reconcile().await.unwrap();

    let row = &l.data().rows["blee/fred"];
    assert_eq!(row.fields[..2], ["fred", "1"]);
    assert_eq!(row.deltas, vec!["", "0", ""]);
    assert_eq!(l.data().changed_rows().count(), 1);
}

#[tokio::test]
async fn test_deltas_only_span_one_cycle() {
    let caller = Arc::new(FakeCaller::new(vec![config_map("blee", "fred", 0)]));
    let l = cm_list("blee", caller.clone());

    l.reconcile().await.unwrap();
    caller.set(vec![config_map("blee", "fred", 1)]);
    l.reconcile().await.unwrap();
    l.reconcile().await.unwrap();

    assert!(!l.data().rows["blee/fred"].has_deltas());
}

#[tokio::test]
async fn test_disappeared_object_is_dropped() {
    let caller = Arc::new(FakeCaller::new(vec![
        config_map("blee", "fred", 1),
        config_map("blee", "zorg", 1),
    ]));
    let l = cm_list("blee", caller.clone());

    l.reconcile().await.unwrap();
    caller.set(vec![config_map("blee", "fred", 1)]);
    l.reconcile().await.unwrap();

    let td = l.data();
    assert_eq!(td.len(), 1);
    assert!(!td.rows.contains_key("blee/zorg"));
    assert!(l.previous().rows.contains_key("blee/zorg"));
}

#[tokio::test]
async fn test_new_object_has_blank_deltas() {
    let caller = Arc::new(FakeCaller::new(vec![config_map("blee", "fred", 1)]));
    let l = cm_list("blee", caller.clone());

    l.reconcile().await.unwrap();
    caller.set(vec![config_map("blee", "fred", 1), config_map("blee", "zorg", 3)]);
    l.reconcile().await.unwrap();

    let row = &l.data().rows["blee/zorg"];
    assert_eq!(row.fields[..2], ["zorg", "3"]);
    assert_eq!(row.deltas, vec!["", "", ""]);
}

#[tokio::test]
async fn test_namespace_column_only_for_all_namespaces() {
    let caller = Arc::new(FakeCaller::new(vec![
        config_map("blee", "fred", 1),
        config_map("duh", "fred", 2),
    ]));

    let scoped = cm_list("blee", caller.clone());
    scoped.reconcile().await.unwrap();
    let td = scoped.data();
    assert_eq!(td.header, vec!["NAME", "DATA", "AGE"]);
    assert_eq!(td.len(), 1);

    let all = cm_list(ALL_NAMESPACES, caller);
    all.reconcile().await.unwrap();
    let td = all.data();
    assert_eq!(td.header, vec!["NAMESPACE", "NAME", "DATA", "AGE"]);
    assert_eq!(td.len(), 2);
    assert_eq!(td.rows["duh/fred"].fields[..3], ["duh", "fred", "2"]);
    assert!(td.is_consistent());
}

#[tokio::test]
async fn test_first_reconcile_has_empty_previous() {
    let l = cm_list("blee", Arc::new(FakeCaller::new(vec![config_map("blee", "fred", 1)])));

    l.reconcile().await.unwrap();

    assert!(l.previous().is_empty());
    assert!(!l.data().rows["blee/fred"].has_deltas());
}
