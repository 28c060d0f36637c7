//! rolegraph permission command

use crate::Context;
use clap::{Args, Subcommand};
use rbac::RoleQuery;

#[derive(Debug, Args)]
pub struct PermissionCommand {
    #[command(subcommand)]
    pub command: PermissionSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PermissionSubcommand {
    /// List known permissions, or confirm that one exists
    List {
        /// Permission name
        name: Option<String>,
    },
}

impl PermissionCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let store = ctx.open_store()?;

        match &self.command {
            PermissionSubcommand::List { name } => {
                let permissions = store.get_permissions(name.as_deref())?;
                if ctx.json {
                    return ctx.print_json(&permissions);
                }
                for permission in &permissions {
                    println!("{}", permission);
                }
            }
        }
        Ok(())
    }
}
