//! rolegraph init command

use crate::Context;
use anyhow::bail;
use clap::Args;
use console::style;
use rbac::{RoleMutation, RoleStore};

const NONE: &[&str] = &[];

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Overwrite an existing document
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        if ctx.path().exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                ctx.path().display()
            );
        }

        let store = starter_store()?;
        store.save_to_path(ctx.path())?;

        if ctx.json {
            ctx.print_json(&serde_json::json!({
                "path": ctx.path(),
                "roles": store.snapshot().roles.keys().collect::<Vec<_>>(),
            }))?;
        } else {
            println!(
                "{} Initialized role document at {}",
                style("✓").green(),
                ctx.path().display()
            );
        }
        Ok(())
    }
}

/// A viewer role and an admin role that inherits from it.
fn starter_store() -> anyhow::Result<RoleStore> {
    let store = RoleStore::empty();
    store.upsert_role("viewer", &["read"], NONE)?;
    store.upsert_role("editor", &["write"], &["viewer"])?;
    store.upsert_role("admin", &["delete", "manage-roles"], &["editor"])?;
    Ok(store)
}
