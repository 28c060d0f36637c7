//! Interfaces the role store exposes to the transport layer

use crate::checker::domain_permission;
use shared::{Result, Role};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::sync::Arc;

/// Read-only queries. Never block and never observe a partial mutation.
pub trait RoleQuery {
    /// All roles, or just the named one (`RoleNotFound` if absent).
    fn get_roles(&self, name: Option<&str>) -> Result<BTreeMap<String, Role>>;

    /// All known permission names, or just the named one (`PermissionNotFound` if absent).
    fn get_permissions(&self, name: Option<&str>) -> Result<Vec<String>>;
}

/// Mutations. Implementations serialize these against each other.
pub trait RoleMutation {
    /// Create or extend a role. Returns the resulting role.
    fn upsert_role<P, Q>(&self, name: &str, permissions: &[P], parents: &[Q]) -> Result<Role>
    where
        P: AsRef<str>,
        Q: AsRef<str>;

    fn delete_role(&self, name: &str) -> Result<bool>;

    /// Remove one permission from one role's direct assignments.
    fn delete_permission(&self, role: &str, permission: &str) -> Result<bool>;

    /// Prune, write the document, then reload from what was written.
    fn save<W: Write>(&self, writer: W) -> Result<()>;

    /// Replace the whole store with a freshly parsed document.
    fn reload<R: Read>(&self, reader: R) -> Result<()>;
}

/// Authorization decisions. Pure and safe for any number of concurrent callers.
pub trait Authorizer {
    fn check<R: AsRef<str>>(&self, roles: &[R], permission: &str) -> bool;

    fn check_domain<R: AsRef<str>>(
        &self,
        roles: &[R],
        domain: Option<&str>,
        permission: &str,
    ) -> bool {
        match domain {
            Some(domain) => self.check(roles, &domain_permission(domain, permission)),
            None => false,
        }
    }
}

impl<T: Authorizer> Authorizer for &T {
    fn check<R: AsRef<str>>(&self, roles: &[R], permission: &str) -> bool {
        (**self).check(roles, permission)
    }
}

impl<T: Authorizer> Authorizer for Arc<T> {
    fn check<R: AsRef<str>>(&self, roles: &[R], permission: &str) -> bool {
        (**self).check(roles, permission)
    }
}
