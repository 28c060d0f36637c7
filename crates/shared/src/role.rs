//! Role entity

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A role as stored in the role document.
///
/// The role's name is the key it is stored under and is not repeated here.
/// Both sets are deduplicated, so repeated inserts are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Directly assigned permission names
    #[serde(default)]
    pub permissions: BTreeSet<String>,

    /// Direct parent role names (weak, name-based references)
    #[serde(default)]
    pub parents: BTreeSet<String>,
}

impl Role {
    /// Create a role with no permissions and no parents
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add permissions
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Builder: add parents
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents.extend(parents.into_iter().map(Into::into));
        self
    }

    /// Assign a permission. Returns false if it was already assigned.
    pub fn grant(&mut self, permission: impl Into<String>) -> bool {
        self.permissions.insert(permission.into())
    }

    /// Remove a permission. Returns false if it was not assigned.
    pub fn revoke(&mut self, permission: &str) -> bool {
        self.permissions.remove(permission)
    }

    /// Add a parent role name. Returns false if it was already present.
    pub fn add_parent(&mut self, parent: impl Into<String>) -> bool {
        self.parents.insert(parent.into())
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn has_parent(&self, parent: &str) -> bool {
        self.parents.contains(parent)
    }
}
