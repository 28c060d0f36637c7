//! File-backed load and save

use rbac::{Guard, RoleMutation, RoleQuery, RoleStore};
use shared::{Caller, ErrorKind};
use std::fs;

const NEWSPAPER: &str = r#"
permissions: [add-text, edit-text, add-photo, newspaperA-mod-story]
roles:
  editor:
    permissions: [add-text, edit-text]
    parents: [reporter]
  reporter:
    permissions: [newspaperA-mod-story]
  photographer:
    permissions: [add-photo]
"#;

#[test]
fn test_save_to_path_prunes_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rbac.yaml");
    fs::write(&path, NEWSPAPER).unwrap();

    let store = RoleStore::open(&path).unwrap();
    store.upsert_role("intern", &["fetch-coffee"], &["photographer"]).unwrap();
    store.delete_role("intern").unwrap();
    store.delete_permission("photographer", "add-photo").unwrap();
    store.save_to_path(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(!written.contains("fetch-coffee"));
    assert!(!written.contains("add-photo"));

    let reopened = RoleStore::open(&path).unwrap();
    assert_eq!(
        reopened.get_permissions(None).unwrap(),
        vec!["add-text", "edit-text", "newspaperA-mod-story"]
    );
    assert_eq!(reopened.get_roles(None).unwrap(), store.get_roles(None).unwrap());
}

#[test]
fn test_open_empty_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rbac.yaml");
    fs::write(&path, "").unwrap();

    let store = RoleStore::open(&path).unwrap();
    assert!(store.get_roles(None).unwrap().is_empty());
    assert!(store.get_permissions(None).unwrap().is_empty());
}

#[test]
fn test_open_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rbac.yaml");
    fs::write(&path, "roles: [").unwrap();

    let err = RoleStore::open(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDocument);
}

#[test]
fn test_diagnostics_serialize_for_reports() {
    let store = RoleStore::from_yaml(
        "roles:\n  a:\n    parents: [b]\n  b:\n    parents: [a, gone]\n",
    )
    .unwrap();

    let report = serde_json::to_value(store.diagnostics()).unwrap();
    assert_eq!(report["cycles"], serde_json::json!([["a", "b"]]));
    assert_eq!(
        report["dangling_parents"],
        serde_json::json!([{ "role": "b", "parent": "gone" }])
    );
}

#[test]
fn test_guard_with_claims_from_loaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rbac.yaml");
    fs::write(&path, NEWSPAPER).unwrap();

    let guard = Guard::new(RoleStore::open(&path).unwrap());
    let caller = Caller::from_claims(&serde_json::json!({
        "user": "alice",
        "roles": ["editor"],
    }))
    .unwrap();

    guard
        .authorize_domain(&caller, Some("newspaperA"), "MOD_STORY")
        .unwrap();
    guard.authorize(&caller, "EditText").unwrap();

    let err = guard.authorize(&caller, "ADD_PHOTO").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
}
