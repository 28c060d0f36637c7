//! Rolegraph CLI - administer and query a role document
//!
//! Usage:
//!   rolegraph init [--force]                        - Write a starter document
//!   rolegraph check <perm> --role R [--domain D]    - Check a permission
//!   rolegraph role list|show|upsert|delete|revoke   - Manage roles
//!   rolegraph permission list [name]                - List permissions
//!   rolegraph validate                              - Report cycles and dangling parents

use clap::{Parser, Subcommand};
use cli::commands::{CheckCommand, InitCommand, PermissionCommand, RoleCommand, ValidateCommand};
use cli::Context;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rolegraph")]
#[command(about = "Rolegraph - role-based access control over a YAML role document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Role document to operate on
    #[arg(short, long, global = true, env = "RBAC_FILE")]
    file: Option<PathBuf>,

    /// JSON store configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Don't write mutations back to the document
    #[arg(long, global = true)]
    no_save: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new role document
    Init(InitCommand),
    /// Check whether roles hold a permission
    Check(CheckCommand),
    /// Manage roles
    Role(RoleCommand),
    /// Inspect permissions
    Permission(PermissionCommand),
    /// Validate the role hierarchy
    Validate(ValidateCommand),
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::resolve(cli.file, cli.config.as_deref(), cli.no_save, cli.json)?;

    let ok = match cli.command {
        Commands::Init(cmd) => cmd.run(&ctx).map(|_| true)?,
        Commands::Check(cmd) => cmd.run(&ctx)?,
        Commands::Role(cmd) => cmd.run(&ctx).map(|_| true)?,
        Commands::Permission(cmd) => cmd.run(&ctx).map(|_| true)?,
        Commands::Validate(cmd) => cmd.run(&ctx)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
