//! Caller identity supplied by the authentication layer

use crate::{RbacError, Result};
use serde::{Deserialize, Serialize};

/// The user and role names extracted from a verified credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Caller {
    pub fn new<I, S>(user: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user: user.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// A caller with no credential. Holds no roles and is denied everything.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a caller from already-verified token claims.
    ///
    /// `user` must be a string. `roles` is optional; non-string entries are
    /// stringified rather than rejected.
    pub fn from_claims(claims: &serde_json::Value) -> Result<Self> {
        let user = claims
            .get("user")
            .and_then(|u| u.as_str())
            .ok_or_else(|| RbacError::InvalidArgument("claims carry no 'user' string".to_string()))?;

        let roles = match claims.get("roles") {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|r| match r {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(RbacError::InvalidArgument(
                    "claim 'roles' must be an array".to_string(),
                ))
            }
        };

        Ok(Self {
            user: user.to_string(),
            roles,
        })
    }

    pub fn is_anonymous(&self) -> bool {
        self.user.is_empty() && self.roles.is_empty()
    }
}
