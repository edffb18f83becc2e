//! clm vars command

use crate::context::Context;
use clap::{Args, Subcommand};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use variables::VariableStore;

#[derive(Debug, Args)]
pub struct VarsCommand {
    #[command(subcommand)]
    pub command: VarsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum VarsSubcommand {
    /// Resolve one variable, or the whole bag when no name is given
    Get {
        /// Fixture file seeding the document store
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        /// Organization id
        #[arg(short, long)]
        org: Option<String>,
        /// End-user id
        #[arg(short, long)]
        end_user: String,
        /// Variable name
        #[arg(short, long)]
        name: Option<String>,
    },
}

impl VarsCommand {
    pub async fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        println!("{}", self.render(ctx).await?);
        Ok(())
    }

    pub async fn render(&self, ctx: &Context) -> anyhow::Result<String> {
        match &self.command {
            VarsSubcommand::Get {
                fixture,
                org,
                end_user,
                name,
            } => {
                let org = ctx.org(org.as_deref())?;
                let (documents, _) = ctx.fixture(fixture.as_deref())?.seed()?;
                let variables = VariableStore::new(Arc::new(documents)).for_end_user(org, end_user.as_str());
                debug!(
                    org_id = variables.org_id(),
                    end_user_id = variables.end_user_id(),
                    "Resolving end-user variables"
                );

                let value = match name {
                    Some(name) => variables.get(name).await?.unwrap_or(serde_json::Value::Null),
                    None => variables
                        .all()
                        .await?
                        .map(serde_json::Value::Object)
                        .unwrap_or(serde_json::Value::Null),
                };

                if ctx.json || !value.is_null() {
                    Ok(serde_json::to_string_pretty(&value)?)
                } else {
                    Ok(style("null").dim().to_string())
                }
            }
        }
    }
}
