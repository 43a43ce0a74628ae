//! Role list behavior against an in-memory cluster

mod common;

use std::sync::Arc;

use common::{FakeCaller, role};
use k8s_openapi::api::rbac::v1::Role;
use kdelta::{KubeResource, List, Lister, Verb};
use serde_json::json;

fn role_list(caller: Arc<FakeCaller>) -> List<KubeResource<Role>> {
    List::new("blee", KubeResource::<Role>::new(caller))
}

#[tokio::test]
async fn test_role_list_data() {
    let caller = Arc::new(FakeCaller::new(vec![role("blee", "fred")]));
    let l = role_list(caller.clone());

    // Two passes so the second one computes deltas
    for _ in 0..2 {
        l.reconcile().await.unwrap();
    }

    assert_eq!(caller.list_count(), 2);
    let td = l.data();
    assert_eq!(td.len(), 1);
    assert_eq!(l.namespace(), "blee");
    assert!(l.has_xray());

    let row = &td.rows["blee/fred"];
    assert_eq!(row.deltas.len(), 2);
    assert!(row.deltas.iter().all(String::is_empty));
    assert_eq!(row.fields[0], "fred");
    assert_eq!(td.header, vec!["NAME", "AGE"]);
}

#[tokio::test]
async fn test_role_list_describe() {
    let caller = Arc::new(FakeCaller::new(vec![role("blee", "fred")]));
    let l = role_list(caller.clone());

    let props = l.describe("blee/fred").await.unwrap();

    assert_eq!(caller.get_count(), 1);
    assert_eq!(props.len(), 2);
    assert_eq!(props[0], ("NAME".to_string(), "fred".to_string()));
    assert_eq!(props[1].0, "AGE");
}

#[tokio::test]
async fn test_role_marshal() {
    let caller = Arc::new(FakeCaller::new(vec![role("blee", "fred")]));
    let l = role_list(caller.clone());

    let doc = l.marshal("blee/fred").await.unwrap();

    assert_eq!(caller.get_count(), 1);
    let head = "typemeta:\n  kind: Role\n  apiversion: rbac.authorization.k8s.io/v1\n";
    assert!(doc.starts_with(&format!("{}objectmeta:\n", head)));
    assert!(doc.contains("  name: fred\n"));
    assert!(doc.contains("  namespace: blee\n"));
    assert!(doc.ends_with("rules: []\n"));
}

#[tokio::test]
async fn test_role_marshal_missing() {
    let l = role_list(Arc::new(FakeCaller::new(vec![])));

    let err = l.marshal("blee/zorg").await.unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_role_access() {
    let l = role_list(Arc::new(FakeCaller::default()));
    let access = l.access();

    assert_eq!(access.kind, "Role");
    assert!(access.can(Verb::Delete));
    assert!(!l.with_read_only(true).access().can(Verb::Delete));
}

#[tokio::test]
async fn test_role_xray_lists_rules() {
    let mut fred = role("blee", "fred");
    fred["rules"] = json!([
        {"apiGroups": [""], "resources": ["configmaps"], "verbs": ["get", "watch"]},
        {"apiGroups": ["batch"], "resources": ["jobs"], "verbs": ["create"]}
    ]);
    let caller = Arc::new(FakeCaller::new(vec![fred]));
    let l = role_list(caller.clone());

    let xray = l.xray("blee/fred").await.unwrap();

    assert_eq!(caller.get_count(), 1);
    assert_eq!(xray.header, vec!["RESOURCES", "API-GROUPS", "VERBS"]);
    assert_eq!(xray.rows[0], vec!["configmaps", "core", "get,watch"]);
    assert_eq!(xray.rows[1], vec!["jobs", "batch", "create"]);
}

#[tokio::test]
async fn test_role_xray_missing() {
    let l = role_list(Arc::new(FakeCaller::default()));
    assert!(l.xray("blee/zorg").await.unwrap_err().is_not_found());
}
