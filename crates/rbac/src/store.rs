//! RoleStore - the shared, concurrently readable role store
//!
//! Readers load the current [`Document`] snapshot without locking. Mutations
//! take one store-wide mutex, build the next snapshot from a copy of the
//! current one, and publish it with a single swap, so a reader sees either
//! the whole mutation or none of it.

use crate::api::{Authorizer, RoleMutation, RoleQuery};
use crate::checker;
use crate::document::Document;
use crate::hierarchy::{self, Diagnostics};
use arc_swap::ArcSwap;
use shared::{RbacError, Result, Role};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct RoleStore {
    current: ArcSwap<Document>,
    /// Serializes mutations, save and reload. Guards no data of its own.
    write_lock: Mutex<()>,
}

impl RoleStore {
    pub fn new(doc: Document) -> Self {
        log_loaded(&doc);
        Self {
            current: ArcSwap::from_pointee(doc),
            write_lock: Mutex::new(()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Document::default())
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(Self::new(Document::from_reader(reader)?))
    }

    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(Self::new(Document::from_yaml(input)?))
    }

    /// Load the store from a YAML file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let store = Self::from_reader(File::open(path)?)?;
        info!(path = %path.display(), "Opened role store");
        Ok(store)
    }

    /// The current snapshot. Later mutations never change it.
    pub fn snapshot(&self) -> Arc<Document> {
        self.current.load_full()
    }

    /// `save` into a file, creating or truncating it.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.save(BufWriter::new(file))?;
        info!(path = %path.display(), "Saved role store");
        Ok(())
    }

    pub fn inheritance_chain(&self, role: &str) -> Vec<String> {
        hierarchy::inheritance_chain(&self.current.load(), role)
    }

    pub fn effective_permissions(&self, role: &str) -> BTreeSet<String> {
        hierarchy::effective_permissions(&self.current.load(), role)
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::of(&self.current.load())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, doc: Document) {
        self.current.store(Arc::new(doc));
    }
}

impl Default for RoleStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl RoleQuery for RoleStore {
    fn get_roles(&self, name: Option<&str>) -> Result<BTreeMap<String, Role>> {
        let doc = self.current.load();
        match name {
            None => Ok(doc.roles.clone()),
            Some(name) => doc
                .roles
                .get_key_value(name)
                .map(|(k, v)| BTreeMap::from([(k.clone(), v.clone())]))
                .ok_or_else(|| RbacError::RoleNotFound(name.to_string())),
        }
    }

    fn get_permissions(&self, name: Option<&str>) -> Result<Vec<String>> {
        let doc = self.current.load();
        match name {
            None => Ok(doc.permissions.clone()),
            Some(name) if doc.has_permission(name) => Ok(vec![name.to_string()]),
            Some(name) => Err(RbacError::PermissionNotFound(name.to_string())),
        }
    }
}

impl RoleMutation for RoleStore {
    /// Merges `permissions` into the role and the known permission list, then
    /// validates and links `parents`.
    ///
    /// If a parent is missing the call fails with `ParentNotFound`. Permissions
    /// already merged into the known permission list stay there; the role
    /// itself is left exactly as it was (or absent, if it was new).
    fn upsert_role<P, Q>(&self, name: &str, permissions: &[P], parents: &[Q]) -> Result<Role>
    where
        P: AsRef<str>,
        Q: AsRef<str>,
    {
        if name.is_empty() {
            return Err(RbacError::InvalidArgument("role name is required".to_string()));
        }
        if permissions.iter().any(|p| p.as_ref().is_empty()) {
            return Err(RbacError::InvalidArgument(format!(
                "empty permission name for role '{}'",
                name
            )));
        }
        if parents.iter().any(|p| p.as_ref().is_empty()) {
            return Err(RbacError::InvalidArgument(format!(
                "empty parent name for role '{}'",
                name
            )));
        }

        let _guard = self.lock();
        let current = self.current.load_full();
        let mut next = (*current).clone();
        let mut role = next.roles.get(name).cloned().unwrap_or_default();

        for permission in permissions {
            let permission = permission.as_ref();
            role.grant(permission);
            next.add_permission(permission);
        }

        for parent in parents {
            let parent = parent.as_ref();
            if parent != name && !next.roles.contains_key(parent) {
                warn!(role = name, parent, "Upsert rejected: parent role not found");
                let mut partial = (*current).clone();
                partial.permissions = next.permissions;
                self.publish(partial);
                return Err(RbacError::ParentNotFound {
                    role: name.to_string(),
                    parent: parent.to_string(),
                });
            }
            role.add_parent(parent);
        }

        next.roles.insert(name.to_string(), role.clone());
        self.publish(next);
        debug!(
            role = name,
            permissions = role.permissions.len(),
            parents = role.parents.len(),
            "Upserted role"
        );
        Ok(role)
    }

    /// Other roles naming `name` as a parent keep the now dangling reference.
    fn delete_role(&self, name: &str) -> Result<bool> {
        let _guard = self.lock();
        let current = self.current.load_full();
        if !current.roles.contains_key(name) {
            return Err(RbacError::RoleNotFound(name.to_string()));
        }

        let mut next = (*current).clone();
        next.roles.remove(name);
        self.publish(next);
        debug!(role = name, "Deleted role");
        Ok(true)
    }

    /// The known permission list and other roles are untouched.
    fn delete_permission(&self, role: &str, permission: &str) -> Result<bool> {
        let _guard = self.lock();
        let current = self.current.load_full();
        let Some(existing) = current.roles.get(role) else {
            return Err(RbacError::RoleNotFound(role.to_string()));
        };
        if !existing.has_permission(permission) {
            return Err(RbacError::PermissionNotAssigned {
                role: role.to_string(),
                permission: permission.to_string(),
            });
        }

        let mut next = (*current).clone();
        if let Some(target) = next.roles.get_mut(role) {
            target.revoke(permission);
        }
        self.publish(next);
        debug!(role, permission, "Removed permission from role");
        Ok(true)
    }

    /// The permission list is pruned to the names some role assigns; this is
    /// the only place pruning happens. A failed write leaves the store as it
    /// was. After a successful write the store is reloaded from the written
    /// text, and a failure to reparse it is returned.
    fn save<W: Write>(&self, mut writer: W) -> Result<()> {
        let _guard = self.lock();
        let pruned = self.current.load().pruned();
        let yaml = pruned.to_yaml()?;

        writer.write_all(yaml.as_bytes())?;
        writer.flush()?;

        let reloaded = Document::from_yaml(&yaml)?;
        log_loaded(&reloaded);
        self.publish(reloaded);
        Ok(())
    }

    fn reload<R: Read>(&self, reader: R) -> Result<()> {
        let doc = Document::from_reader(reader)?;
        let _guard = self.lock();
        log_loaded(&doc);
        self.publish(doc);
        Ok(())
    }
}

impl Authorizer for RoleStore {
    fn check<R: AsRef<str>>(&self, roles: &[R], permission: &str) -> bool {
        let granted = checker::check(&self.current.load(), roles, permission);
        debug!(permission, granted, "Permission check");
        granted
    }

    fn check_domain<R: AsRef<str>>(
        &self,
        roles: &[R],
        domain: Option<&str>,
        permission: &str,
    ) -> bool {
        let granted = checker::check_domain(&self.current.load(), roles, domain, permission);
        debug!(?domain, permission, granted, "Domain permission check");
        granted
    }
}

fn log_loaded(doc: &Document) {
    info!(
        roles = doc.roles.len(),
        permissions = doc.permissions.len(),
        "Loaded role document"
    );

    let diagnostics = Diagnostics::of(doc);
    for cycle in &diagnostics.cycles {
        warn!(cycle = %cycle.join(" -> "), "Role hierarchy contains a cycle");
    }
    for dangling in &diagnostics.dangling_parents {
        warn!(
            role = %dangling.role,
            parent = %dangling.parent,
            "Role names a parent that does not exist"
        );
    }
}
