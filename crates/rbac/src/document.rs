//! Document - the persisted shape of the role store
//!
//! ```yaml
//! permissions:
//! - add-text
//! roles:
//!   editor:
//!     permissions: [add-text]
//!     parents: []
//! ```

use serde::{Deserialize, Serialize};
use shared::{Result, Role};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;

/// The full role store: known permission names plus every role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Known permission names, unique, in first-seen order
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Role name -> role
    #[serde(default)]
    pub roles: BTreeMap<String, Role>,
}

impl Document {
    /// Parse a YAML document. Blank input yields an empty document.
    ///
    /// Parent references are not validated here; a parent that does not name a
    /// role is a dead end during resolution.
    pub fn from_yaml(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut doc: Document = serde_yaml::from_str(input)?;
        doc.dedup_permissions();
        Ok(doc)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_yaml(&input)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Append to the known permission list unless already present.
    pub fn add_permission(&mut self, permission: &str) -> bool {
        if self.has_permission(permission) {
            return false;
        }
        self.permissions.push(permission.to_string());
        true
    }

    /// A copy whose permission list holds exactly the names some role assigns.
    ///
    /// Surviving names keep their order; names assigned but never listed are
    /// appended in role-name order.
    pub fn pruned(&self) -> Self {
        let referenced: HashSet<&str> = self
            .roles
            .values()
            .flat_map(|r| r.permissions.iter().map(String::as_str))
            .collect();

        let mut permissions: Vec<String> = self
            .permissions
            .iter()
            .filter(|p| referenced.contains(p.as_str()))
            .cloned()
            .collect();

        for role in self.roles.values() {
            for p in &role.permissions {
                if !permissions.contains(p) {
                    permissions.push(p.clone());
                }
            }
        }

        Self {
            permissions,
            roles: self.roles.clone(),
        }
    }

    fn dedup_permissions(&mut self) {
        let mut seen = HashSet::new();
        self.permissions.retain(|p| seen.insert(p.clone()));
    }
}
