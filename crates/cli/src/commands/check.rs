//! rolegraph check command

use crate::Context;
use clap::Args;
use console::style;
use rbac::Guard;
use shared::{Caller, ErrorKind};

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Permission to check. Directive-style names (MOD_STORY) are converted
    /// to kebab case.
    pub permission: String,

    /// Role held by the caller (repeatable)
    #[arg(short, long = "role")]
    pub roles: Vec<String>,

    /// Domain the permission is scoped to
    #[arg(short, long)]
    pub domain: Option<String>,

    /// User name reported in denials
    #[arg(short, long, default_value = "cli")]
    pub user: String,
}

impl CheckCommand {
    /// Returns whether access was allowed.
    pub fn run(&self, ctx: &Context) -> anyhow::Result<bool> {
        let guard = Guard::new(ctx.open_store()?);
        let caller = Caller::new(self.user.as_str(), &self.roles);

        let decision = match self.domain.as_deref() {
            Some(domain) => guard.authorize_domain(&caller, Some(domain), &self.permission),
            None => guard.authorize(&caller, &self.permission),
        };
        let allowed = match decision {
            Ok(()) => true,
            Err(err) if err.kind() == ErrorKind::AccessDenied => false,
            Err(err) => return Err(err.into()),
        };

        if ctx.json {
            ctx.print_json(&serde_json::json!({
                "allowed": allowed,
                "permission": self.permission,
                "domain": self.domain,
                "roles": self.roles,
            }))?;
        } else {
            let verdict = if allowed {
                style("ALLOW").green().bold()
            } else {
                style("DENY").red().bold()
            };
            println!("{} {} for [{}]", verdict, self.permission, self.roles.join(", "));
        }

        Ok(allowed)
    }
}
