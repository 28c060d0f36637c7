//! Rolegraph CLI library: the commands and the context they share

pub mod commands;
pub mod context;

pub use context::Context;
