//! Concurrent readers and writers against one shared store

use rbac::{Authorizer, RoleMutation, RoleQuery, RoleStore};
use std::sync::Arc;
use std::thread;

const BASE: &str = r#"
permissions: [read, write]
roles:
  reader:
    permissions: [read]
  writer:
    permissions: [write]
    parents: [reader]
"#;

const NONE: &[&str] = &[];

#[test]
fn test_readers_never_see_partial_upsert() {
    let store = Arc::new(RoleStore::from_yaml(BASE).unwrap());

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..200 {
                let name = format!("role{}", i);
                let perm = format!("perm{}", i);
                store.upsert_role(&name, &[perm.as_str()], &["writer"]).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    let snapshot = store.snapshot();
                    for (name, role) in &snapshot.roles {
                        // A published role always has its permissions listed
                        for p in &role.permissions {
                            assert!(snapshot.has_permission(p), "{} lists unknown {}", name, p);
                        }
                    }
                    assert!(store.check(&["writer"], "read"));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(store.get_roles(None).unwrap().len(), 202);
    assert!(store.check(&["role199"], "perm199"));
    assert!(store.check(&["role199"], "read"));
}

#[test]
fn test_concurrent_upserts_to_one_role_all_land() {
    let store = Arc::new(RoleStore::empty());
    store.upsert_role("shared", NONE, NONE).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let perm = format!("t{}-p{}", t, i);
                    store.upsert_role("shared", &[perm], NONE).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let roles = store.get_roles(Some("shared")).unwrap();
    assert_eq!(roles["shared"].permissions.len(), 200);
    assert_eq!(store.get_permissions(None).unwrap().len(), 200);
}

#[test]
fn test_mixed_mutations_and_saves() {
    let store = Arc::new(RoleStore::from_yaml(BASE).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    let name = format!("t{}-r{}", t, i);
                    store.upsert_role(&name, &["tmp"], &["reader"]).unwrap();
                    store.delete_permission(&name, "tmp").unwrap();
                    store.delete_role(&name).unwrap();
                    if i % 10 == 0 {
                        store.save(Vec::new()).unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    store.save(Vec::new()).unwrap();
    assert_eq!(store.get_roles(None).unwrap().len(), 2);
    assert_eq!(store.get_permissions(None).unwrap(), vec!["read", "write"]);
}
