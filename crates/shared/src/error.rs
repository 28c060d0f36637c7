//! Error types for rolegraph

use thiserror::Error;

/// Coarse classification of an [`RbacError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ParentNotFound,
    InvalidArgument,
    MalformedDocument,
    Io,
    AccessDenied,
}

/// General rolegraph error type
#[derive(Debug, Error)]
pub enum RbacError {
    #[error("Role '{0}' not found")]
    RoleNotFound(String),

    #[error("Permission '{0}' not found")]
    PermissionNotFound(String),

    #[error("Permission '{permission}' is not assigned to role '{role}'")]
    PermissionNotAssigned { role: String, permission: String },

    #[error("Parent role '{parent}' of role '{role}' not found")]
    ParentNotFound { role: String, parent: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(#[source] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Access denied: user '{user}' lacks permission '{permission}'")]
    AccessDenied { user: String, permission: String },
}

impl RbacError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RbacError::RoleNotFound(_)
            | RbacError::PermissionNotFound(_)
            | RbacError::PermissionNotAssigned { .. } => ErrorKind::NotFound,
            RbacError::ParentNotFound { .. } => ErrorKind::ParentNotFound,
            RbacError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RbacError::MalformedDocument(_) => ErrorKind::MalformedDocument,
            RbacError::Io(_) => ErrorKind::Io,
            RbacError::AccessDenied { .. } => ErrorKind::AccessDenied,
        }
    }

    /// True for any of the not-found variants (role, permission, permission-in-role).
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<serde_yaml::Error> for RbacError {
    fn from(err: serde_yaml::Error) -> Self {
        RbacError::MalformedDocument(err)
    }
}

pub type Result<T> = std::result::Result<T, RbacError>;
