//! clm users command

use crate::context::{split_list, Context};
use admin::adapter::InMemoryUserStore;
use admin::{UserAdminService, UserForm};
use anyhow::Context as _;
use clap::{Args, Subcommand};
use console::style;
use directory::UserDirectory;
use rbac::AccessController;
use shared::{TracingLogger, User};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersSubcommand {
    /// List the organization's users, optionally only the given ids
    List {
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        #[arg(short, long)]
        org: Option<String>,
        /// User ids (comma-separated)
        #[arg(long)]
        ids: Option<String>,
    },
    /// Show one user and the roles granted in the organization
    Show {
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        #[arg(short, long)]
        org: Option<String>,
        /// User id
        #[arg(long)]
        id: String,
    },
    /// Add a user to the organization and print the resulting account
    Add {
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        #[arg(short, long)]
        org: Option<String>,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Change a member's name and roles and print the updated account
    Edit {
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        #[arg(short, long)]
        org: Option<String>,
        /// User id
        #[arg(long)]
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Change only a member's display name
    Rename {
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        #[arg(short, long)]
        org: Option<String>,
        /// User id
        #[arg(long)]
        id: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Point a member's photo at an uploaded file
    SetPhoto {
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        #[arg(short, long)]
        org: Option<String>,
        /// User id
        #[arg(long)]
        id: String,
        /// URL of the uploaded photo
        #[arg(long)]
        url: String,
    },
    /// Send a password reset email to an existing account
    ResetPassword {
        #[arg(short, long)]
        fixture: Option<PathBuf>,
        #[arg(long)]
        email: String,
    },
}

/// Fields of the add/edit user form
#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Selected roles (comma-separated)
    #[arg(long, default_value = "")]
    pub roles: String,
}

impl From<&FormArgs> for UserForm {
    fn from(args: &FormArgs) -> Self {
        UserForm {
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
            roles: split_list(&args.roles),
        }
    }
}

impl UsersCommand {
    pub async fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        println!("{}", self.render(ctx).await?);
        Ok(())
    }

    pub async fn render(&self, ctx: &Context) -> anyhow::Result<String> {
        match &self.command {
            UsersSubcommand::List { fixture, org, ids } => {
                let (directory, _, _) = load_directory(ctx, fixture, org).await?;
                let roster = directory.snapshot();

                let users: Vec<&User> = match ids {
                    Some(ids) => roster.filter_by_ids(&split_list(ids)),
                    None => roster.users().iter().collect(),
                };

                if ctx.json {
                    return Ok(serde_json::to_string_pretty(&users)?);
                }
                Ok(users
                    .iter()
                    .map(|u| format!("{:<12} {}", style(&u.id).cyan(), u.display_name))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            UsersSubcommand::Show { fixture, org, id } => {
                let (directory, _, org) = load_directory(ctx, fixture, org).await?;
                let user = directory.find_by_id(id)?;

                if ctx.json {
                    return Ok(serde_json::to_string_pretty(&user)?);
                }

                let access = user
                    .roles_for(&org)
                    .map(AccessController::from_role_map)
                    .unwrap_or_default();
                Ok(format!(
                    "{} ({})\n  email: {}\n  roles: {}",
                    style(&user.display_name).bold(),
                    user.id,
                    user.email,
                    access.granted().join(", ")
                ))
            }
            UsersSubcommand::Add { fixture, org, form } => {
                let org = ctx.org(org.as_deref())?;
                let fixture = ctx.fixture(fixture.as_deref())?;
                let organization = fixture
                    .organization(&org)
                    .with_context(|| format!("organization '{}' is not in the fixture", org))?;
                let (_, users) = fixture.seed()?;

                let user_id = admin_service(&users)
                    .add_user_to_org(organization, &UserForm::from(form))
                    .await?;

                let created = users
                    .get(&user_id)?
                    .with_context(|| format!("created user '{}' could not be read back", user_id))?;
                Ok(serde_json::to_string_pretty(&created)?)
            }
            UsersSubcommand::Edit { fixture, org, id, form } => {
                let org = ctx.org(org.as_deref())?;
                let fixture = ctx.fixture(fixture.as_deref())?;
                let organization = fixture
                    .organization(&org)
                    .with_context(|| format!("organization '{}' is not in the fixture", org))?;
                let (_, users) = fixture.seed()?;

                let directory = UserDirectory::new(Arc::new(users.clone()));
                let roster = directory.refresh(&org).await?;
                let user = roster.find_by_id(id)?;

                let updated = admin_service(&users)
                    .update_user_details(organization, user, &UserForm::from(form))
                    .await?;
                Ok(serde_json::to_string_pretty(&updated)?)
            }
            UsersSubcommand::Rename {
                fixture,
                org,
                id,
                first_name,
                last_name,
            } => {
                let (directory, users, _) = load_directory(ctx, fixture, org).await?;
                let form = UserForm {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    ..Default::default()
                };

                let updated = admin_service(&users)
                    .update_user_name(&directory.find_by_id(id)?, &form)
                    .await?;
                Ok(serde_json::to_string_pretty(&updated)?)
            }
            UsersSubcommand::SetPhoto { fixture, org, id, url } => {
                let (directory, users, _) = load_directory(ctx, fixture, org).await?;

                let updated = admin_service(&users)
                    .update_user_photo_url(&directory.find_by_id(id)?, url)
                    .await?;
                Ok(serde_json::to_string_pretty(&updated)?)
            }
            UsersSubcommand::ResetPassword { fixture, email } => {
                let (_, users) = ctx.fixture(fixture.as_deref())?.seed()?;
                admin_service(&users).request_password_reset(email).await?;

                if ctx.json {
                    return Ok(serde_json::json!({ "email": email, "requested": true }).to_string());
                }
                Ok(format!("Password reset email requested for {}", style(email).bold()))
            }
        }
    }
}

fn admin_service(users: &InMemoryUserStore) -> UserAdminService {
    let users = Arc::new(users.clone());
    UserAdminService::new(Arc::new(TracingLogger), users.clone(), users.clone(), users)
}

/// Seed the user store from the fixture and load the organization's roster
async fn load_directory(
    ctx: &Context,
    fixture: &Option<PathBuf>,
    org: &Option<String>,
) -> anyhow::Result<(UserDirectory, InMemoryUserStore, String)> {
    let org = ctx.org(org.as_deref())?;
    let (_, users) = ctx.fixture(fixture.as_deref())?.seed()?;

    let directory = UserDirectory::new(Arc::new(users.clone()));
    directory.refresh(&org).await?;
    Ok((directory, users, org))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "organizations": [{"id": "acme", "roles": ["admin", "editor"]}],
        "users": [
            {"id": "u1", "displayName": "Ada Lovelace", "orgs": ["acme"], "email": "ada@example.com",
             "roles": {"acme": {"admin": true, "editor": false, "access": true}}},
            {"id": "u2", "displayName": "Grace Hopper", "orgs": ["acme"]},
            {"id": "b1", "displayName": "Barbara Liskov", "orgs": ["beta"]}
        ]
    }"#;

    fn fixture_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_list_filters_by_ids() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::List {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                ids: Some("u2,b1".to_string()),
            },
        };

        let out = cmd.render(&Context::new(Default::default(), true)).await.unwrap();
        let users: Vec<User> = serde_json::from_str(&out).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u2");
    }

    #[tokio::test]
    async fn test_show_lists_granted_roles() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::Show {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                id: "u1".to_string(),
            },
        };

        let out = cmd.render(&Context::new(Default::default(), false)).await.unwrap();
        assert!(out.contains("roles: admin"));
        assert!(!out.contains("access"));
    }

    #[tokio::test]
    async fn test_show_unknown_user_fails() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::Show {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                id: "b1".to_string(),
            },
        };

        let err = cmd.render(&Context::new(Default::default(), false)).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_add_user_prints_created_account() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::Add {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                form: FormArgs {
                    first_name: "Katherine".to_string(),
                    last_name: "Johnson".to_string(),
                    email: Some("kj@example.com".to_string()),
                    phone: None,
                    roles: "editor,ghost".to_string(),
                },
            },
        };

        let out = cmd.render(&Context::new(Default::default(), true)).await.unwrap();
        let user: User = serde_json::from_str(&out).unwrap();

        assert_eq!(user.display_name, "Katherine Johnson");
        assert_eq!(
            serde_json::to_value(user.roles_for("acme").unwrap()).unwrap(),
            serde_json::json!({"admin": false, "editor": true, "access": false, "principal": false})
        );
    }

    #[tokio::test]
    async fn test_add_user_without_email_prints_the_new_account() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::Add {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                form: FormArgs {
                    first_name: "Katherine".to_string(),
                    last_name: "Johnson".to_string(),
                    email: None,
                    phone: None,
                    roles: String::new(),
                },
            },
        };

        let out = cmd.render(&Context::new(Default::default(), true)).await.unwrap();
        let user: User = serde_json::from_str(&out).unwrap();

        assert_eq!(user.display_name, "Katherine Johnson");
        assert!(!["u1", "u2", "b1"].contains(&user.id.as_str()));
        assert!(user.email.is_empty());
    }

    #[tokio::test]
    async fn test_reset_password() {
        let file = fixture_file();
        let reset = |email: &str| UsersCommand {
            command: UsersSubcommand::ResetPassword {
                fixture: Some(file.path().to_path_buf()),
                email: email.to_string(),
            },
        };
        let ctx = Context::new(Default::default(), true);

        let out = reset("ada@example.com").render(&ctx).await.unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&out).unwrap(),
            serde_json::json!({"email": "ada@example.com", "requested": true})
        );
        assert!(reset("nobody@example.com").render(&ctx).await.is_err());
    }

    #[tokio::test]
    async fn test_edit_user_keeps_access_flag() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::Edit {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                id: "u1".to_string(),
                form: FormArgs {
                    first_name: "Ada".to_string(),
                    last_name: "King".to_string(),
                    email: None,
                    phone: None,
                    roles: "editor".to_string(),
                },
            },
        };

        let out = cmd.render(&Context::new(Default::default(), true)).await.unwrap();
        let user: User = serde_json::from_str(&out).unwrap();

        assert_eq!(user.display_name, "Ada King");
        assert_eq!(
            serde_json::to_value(user.roles_for("acme").unwrap()).unwrap(),
            serde_json::json!({"admin": false, "editor": true, "access": true})
        );
    }

    #[tokio::test]
    async fn test_rename_keeps_roles() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::Rename {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                id: "u1".to_string(),
                first_name: "Augusta".to_string(),
                last_name: "King".to_string(),
            },
        };

        let out = cmd.render(&Context::new(Default::default(), true)).await.unwrap();
        let user: User = serde_json::from_str(&out).unwrap();

        assert_eq!(user.display_name, "Augusta King");
        assert_eq!(user.roles_for("acme").unwrap().get("admin"), Some(true));
    }

    #[tokio::test]
    async fn test_set_photo() {
        let file = fixture_file();
        let cmd = UsersCommand {
            command: UsersSubcommand::SetPhoto {
                fixture: Some(file.path().to_path_buf()),
                org: Some("acme".to_string()),
                id: "u2".to_string(),
                url: "https://cdn.example.com/u2.png".to_string(),
            },
        };

        let out = cmd.render(&Context::new(Default::default(), true)).await.unwrap();
        let user: User = serde_json::from_str(&out).unwrap();

        assert_eq!(user.photo_url.as_deref(), Some("https://cdn.example.com/u2.png"));
    }
}
