//! rolegraph validate command

use crate::Context;
use clap::Args;
use console::style;

#[derive(Debug, Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Returns false if any role names a parent that does not exist. Cycles
    /// are reported but resolve safely, so they don't fail validation.
    pub fn run(&self, ctx: &Context) -> anyhow::Result<bool> {
        let diagnostics = ctx.open_store()?.diagnostics();
        let valid = diagnostics.dangling_parents.is_empty();

        if ctx.json {
            ctx.print_json(&serde_json::json!({
                "valid": valid,
                "cycles": diagnostics.cycles,
                "danglingParents": diagnostics.dangling_parents,
            }))?;
            return Ok(valid);
        }

        for cycle in &diagnostics.cycles {
            println!(
                "{} cycle: {} -> {}",
                style("warning").yellow().bold(),
                cycle.join(" -> "),
                cycle[0]
            );
        }
        for dangling in &diagnostics.dangling_parents {
            println!(
                "{} role '{}' names missing parent '{}'",
                style("error").red().bold(),
                dangling.role,
                dangling.parent
            );
        }
        if diagnostics.is_clean() {
            println!("{} {} is valid", style("✓").green(), ctx.path().display());
        }
        Ok(valid)
    }
}
