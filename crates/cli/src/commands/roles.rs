//! clm roles command

use crate::context::{split_list, Context};
use clap::{Args, Subcommand};
use console::style;
use rbac::{has_role, AssignmentMode, RoleAssignmentEngine};
use shared::RoleMap;
use std::collections::HashSet;

#[derive(Debug, Args)]
pub struct RolesCommand {
    #[command(subcommand)]
    pub command: RolesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RolesSubcommand {
    /// Compute the role map for a user
    Compute {
        /// Roles defined by the organization (comma-separated, in order)
        #[arg(long)]
        org_roles: String,
        /// Roles selected for the user (comma-separated)
        #[arg(long, default_value = "")]
        selected: String,
        /// Compute for an existing user (no reserved flags)
        #[arg(long)]
        editing: bool,
    },
    /// Check whether a role is among the granted roles
    Check {
        /// Role to check
        #[arg(short, long)]
        role: String,
        /// Granted roles (comma-separated)
        #[arg(short, long, default_value = "")]
        granted: String,
    },
}

impl RolesCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        println!("{}", self.render(ctx)?);
        Ok(())
    }

    pub fn render(&self, ctx: &Context) -> anyhow::Result<String> {
        match &self.command {
            RolesSubcommand::Compute {
                org_roles,
                selected,
                editing,
            } => {
                let org_roles = split_list(org_roles);
                let selected: HashSet<String> = split_list(selected).into_iter().collect();
                let roles = RoleAssignmentEngine::new().compute_roles(
                    &org_roles,
                    &selected,
                    AssignmentMode::from_editing(*editing),
                );

                if ctx.json {
                    Ok(serde_json::to_string_pretty(&roles)?)
                } else {
                    Ok(render_role_map(&org_roles, &roles))
                }
            }
            RolesSubcommand::Check { role, granted } => {
                let granted = split_list(granted);
                let allowed = has_role(role, &granted);

                if ctx.json {
                    Ok(serde_json::json!({ "role": role, "granted": allowed }).to_string())
                } else {
                    Ok(allowed.to_string())
                }
            }
        }
    }
}

fn render_role_map(org_roles: &[String], roles: &RoleMap) -> String {
    let mark = |granted: bool| {
        if granted {
            style("yes").green().to_string()
        } else {
            style("no").dim().to_string()
        }
    };

    let mut lines: Vec<String> = org_roles
        .iter()
        .filter_map(|r| roles.get(r).map(|granted| format!("  {:<16} {}", r, mark(granted))))
        .collect();

    if !roles.has_reserved_flags() {
        return lines.join("\n");
    }
    for (name, value) in [("access", roles.access()), ("principal", roles.principal())] {
        if let Some(granted) = value {
            lines.push(format!("  {:<16} {}", style(name).italic(), mark(granted)));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: RolesSubcommand,
    }

    fn render(args: &[&str], json: bool) -> String {
        let cli = TestCli::try_parse_from(args).unwrap();
        let cmd = RolesCommand { command: cli.command };
        cmd.render(&Context::new(Default::default(), json)).unwrap()
    }

    #[test]
    fn test_compute_json_for_new_user() {
        let out = render(&["t", "compute", "--org-roles", "admin,editor", "--selected", "editor"], true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"admin": false, "editor": true, "access": false, "principal": false})
        );
    }

    #[test]
    fn test_compute_json_editing() {
        let out = render(
            &["t", "compute", "--org-roles", "admin,editor", "--selected", "admin,editor,ghost", "--editing"],
            true,
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value, serde_json::json!({"admin": true, "editor": true}));
    }

    #[test]
    fn test_check() {
        assert_eq!(render(&["t", "check", "--role", "admin", "--granted", "editor,admin"], false), "true");
        assert_eq!(render(&["t", "check", "--role", "admin"], false), "false");
    }

    #[test]
    fn test_compute_text_lists_org_roles_in_order() {
        let out = render(&["t", "compute", "--org-roles", "zeta,alpha", "--selected", "alpha", "--editing"], false);
        let zeta = out.find("zeta").unwrap();
        let alpha = out.find("alpha").unwrap();

        assert!(zeta < alpha);
        assert!(!out.contains("access"));
    }
}
