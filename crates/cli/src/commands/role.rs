//! rolegraph role command

use crate::Context;
use clap::{Args, Subcommand};
use console::style;
use rbac::{RoleMutation, RoleQuery};
use shared::Role;

#[derive(Debug, Args)]
pub struct RoleCommand {
    #[command(subcommand)]
    pub command: RoleSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RoleSubcommand {
    /// List all roles
    List,
    /// Show a role with everything it inherits
    Show {
        /// Role name
        name: String,
    },
    /// Create a role, or add permissions and parents to an existing one
    Upsert {
        /// Role name
        name: String,
        /// Permission to assign (repeatable)
        #[arg(short, long = "permission")]
        permissions: Vec<String>,
        /// Parent role to inherit from (repeatable)
        #[arg(long = "parent")]
        parents: Vec<String>,
    },
    /// Delete a role. Roles naming it as a parent keep the reference.
    Delete {
        /// Role name
        name: String,
    },
    /// Remove a directly assigned permission from a role
    Revoke {
        /// Role name
        name: String,
        /// Permission to remove
        permission: String,
    },
}

impl RoleCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let store = ctx.open_store()?;

        match &self.command {
            RoleSubcommand::List => {
                let roles = store.get_roles(None)?;
                if ctx.json {
                    return ctx.print_json(&roles);
                }
                if roles.is_empty() {
                    println!("No roles defined");
                }
                for (name, role) in &roles {
                    print_role(name, role);
                }
            }
            RoleSubcommand::Show { name } => {
                let roles = store.get_roles(Some(name.as_str()))?;
                let inherits: Vec<String> =
                    store.inheritance_chain(name).into_iter().skip(1).collect();
                let effective = store.effective_permissions(name);

                if ctx.json {
                    return ctx.print_json(&serde_json::json!({
                        "name": name,
                        "role": roles.get(name),
                        "inherits": inherits,
                        "effectivePermissions": effective,
                    }));
                }
                if let Some(role) = roles.get(name) {
                    print_role(name, role);
                }
                println!("  inherits:  {}", list(&inherits));
                println!("  effective: {}", list(&effective));
            }
            RoleSubcommand::Upsert {
                name,
                permissions,
                parents,
            } => {
                let role = store.upsert_role(name, permissions, parents)?;
                let saved = ctx.persist(&store)?;
                report(ctx, "upserted", name, saved)?;
                if !ctx.json {
                    print_role(name, &role);
                }
            }
            RoleSubcommand::Delete { name } => {
                store.delete_role(name)?;
                let saved = ctx.persist(&store)?;
                report(ctx, "deleted", name, saved)?;
            }
            RoleSubcommand::Revoke { name, permission } => {
                store.delete_permission(name, permission)?;
                let saved = ctx.persist(&store)?;
                report(ctx, "revoked", &format!("{} from {}", permission, name), saved)?;
            }
        }
        Ok(())
    }
}

fn report(ctx: &Context, action: &str, target: &str, saved: bool) -> anyhow::Result<()> {
    if ctx.json {
        return ctx.print_json(&serde_json::json!({
            "action": action,
            "target": target,
            "saved": saved,
        }));
    }
    let note = if saved { "" } else { " (not saved)" };
    println!("{} {} {}{}", style("✓").green(), action, target, note);
    Ok(())
}

fn print_role(name: &str, role: &Role) {
    println!("{}", style(name).bold());
    println!("  permissions: {}", list(&role.permissions));
    println!("  parents:     {}", list(&role.parents));
}

fn list<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined: Vec<&str> = items.into_iter().map(String::as_str).collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(", ")
    }
}
