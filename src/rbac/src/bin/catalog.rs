//! # rbac-catalog
//!
//! Inspect the compiled-in role and permission catalogs and try out
//! permission checks without a running service.
//!
//! ## Commands
//!
//! - `manifest` - Print the catalog manifest as JSON
//! - `roles` - List roles with level and permission count
//! - `assignable <role>` - Roles a holder of `<role>` may assign
//! - `check <permission> --role R --grant P --deny P` - Evaluate an ad-hoc record
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RBAC_CONFIG` - Resolver config file (TOML)
//! - `RUST_LOG` - Log level (default: info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cretoai_rbac::catalog::{self, get_assignable_roles};
use cretoai_rbac::{Permission, PermissionResolver, ResolverConfig, Role, UserPermissionRecord};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CretoAI RBAC catalog tool
#[derive(Parser)]
#[command(name = "rbac-catalog")]
#[command(about = "Inspect CretoAI role and permission catalogs")]
#[command(version)]
struct Cli {
    /// Path to resolver configuration file
    #[arg(short, long, env = "RBAC_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the catalog manifest as JSON
    Manifest,

    /// List roles by hierarchy level
    Roles,

    /// List the roles a holder of ROLE may assign to others
    Assignable {
        /// Assigning role
        role: Role,
    },

    /// Evaluate a permission against an ad-hoc record
    Check {
        /// Permission to check (domain:action)
        permission: Permission,

        /// Role to assign (repeatable)
        #[arg(long = "role")]
        roles: Vec<Role>,

        /// Custom grant (repeatable)
        #[arg(long)]
        grant: Vec<Permission>,

        /// Denial (repeatable)
        #[arg(long)]
        deny: Vec<Permission>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Manifest => {
            println!("{}", catalog::manifest().to_json_pretty()?);
        }
        Command::Roles => {
            for role in Role::all().iter().rev() {
                let description = role.description();
                println!(
                    "{:<12} level={:<4} permissions={:<3} {}",
                    role.as_str(),
                    role.level(),
                    role.permissions().len(),
                    description.summary
                );
            }
        }
        Command::Assignable { role } => {
            let mut roles: Vec<Role> = get_assignable_roles(role).into_iter().collect();
            roles.sort_by_key(|r| std::cmp::Reverse(r.level()));
            for assignable in roles {
                println!("{}", assignable);
            }
        }
        Command::Check {
            permission,
            roles,
            grant,
            deny,
        } => {
            let config = match &cli.config {
                Some(path) => ResolverConfig::load(path)
                    .with_context(|| format!("loading config from {}", path.display()))?,
                None => ResolverConfig::default(),
            };
            let resolver = PermissionResolver::with_config(config)?;

            // Denials are applied last so they win over grants on the command line
            let mut record = UserPermissionRecord::new("cli").with_roles(roles);
            for p in grant {
                record = record.with_custom_permission(p);
            }
            for p in deny {
                record = record.with_denied_permission(p);
            }
            resolver.set_user_permissions(record);

            let allowed = resolver.check_permission("cli", permission);
            info!("Checked {} against ad-hoc record", permission);

            println!("{}: {}", permission, if allowed { "ALLOW" } else { "DENY" });
            println!(
                "effective: {}",
                resolver.effective_permissions("cli").to_strings().join(", ")
            );
        }
    }

    Ok(())
}
