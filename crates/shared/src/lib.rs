//! # Rolegraph Shared
//!
//! Common types used across the rolegraph crates: the error taxonomy, the
//! `Role` entity, the caller identity and store configuration.

pub mod config;
pub mod error;
pub mod identity;
pub mod role;

// Re-exports
pub use config::*;
pub use error::*;
pub use identity::*;
pub use role::*;
