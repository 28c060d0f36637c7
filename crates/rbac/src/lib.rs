//! # Rolegraph RBAC
//!
//! Role-based access control over a single YAML role document.
//!
//! ## Components
//!
//! - `RoleStore` - Concurrently readable store with serialized mutations
//! - `Document` - YAML codec for the persisted store
//! - `hierarchy` - Cycle-safe resolution of inherited permissions
//! - `checker` - `check` / `check_domain` decisions
//! - `Guard` - Maps denied decisions to `AccessDenied` errors

pub mod api;
pub mod checker;
pub mod document;
pub mod guard;
pub mod hierarchy;
pub mod store;

pub use api::{Authorizer, RoleMutation, RoleQuery};
pub use document::Document;
pub use guard::{directive_permission, Guard};
pub use hierarchy::{DanglingParent, Diagnostics};
pub use store::RoleStore;
