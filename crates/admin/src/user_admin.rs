//! UserAdminService - organization user administration
//!
//! Wires the role assignment engine to the remote collaborators: adding a
//! user to an organization, editing a user's details and roles, and the
//! small profile updates around them.

use crate::collaborators::{PasswordResetter, UserCreator, UserUpdater};
use crate::payload::{CreateUserPayload, UserForm};
use rbac::{AssignmentMode, RoleAssignmentEngine};
use shared::{Logger, Organization, Result, RoleMembershipError, User};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// User administration for organization admins
pub struct UserAdminService {
    logger: Arc<dyn Logger>,
    engine: RoleAssignmentEngine,
    creator: Arc<dyn UserCreator>,
    updater: Arc<dyn UserUpdater>,
    resetter: Arc<dyn PasswordResetter>,
}

impl UserAdminService {
    pub fn new(
        logger: Arc<dyn Logger>,
        creator: Arc<dyn UserCreator>,
        updater: Arc<dyn UserUpdater>,
        resetter: Arc<dyn PasswordResetter>,
    ) -> Self {
        Self {
            logger,
            engine: RoleAssignmentEngine::new(),
            creator,
            updater,
            resetter,
        }
    }

    fn meta(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Build the create-user payload for a new member of `org`
    pub fn build_create_payload(&self, org: &Organization, form: &UserForm) -> CreateUserPayload {
        let selected: HashSet<String> = form.roles.iter().cloned().collect();
        let org_roles = self
            .engine
            .compute_roles(&org.roles, &selected, AssignmentMode::Creating);
        CreateUserPayload::new(&org.id, form, org_roles)
    }

    /// Create a new user in `org` through the remote create-user call and
    /// return the assigned user id. A rejection is returned unchanged;
    /// nothing is retried.
    pub async fn add_user_to_org(&self, org: &Organization, form: &UserForm) -> Result<String> {
        let payload = self.build_create_payload(org, form);
        let display_name = payload.display_name.clone();

        let user_id = match self.creator.create_user(payload).await {
            Ok(user_id) => user_id,
            Err(e) => {
                self.logger.warn(
                    &format!("Creating user '{}' failed: {}", display_name, e),
                    Some(&Self::meta(&[("org", org.id.as_str())])),
                );
                return Err(e.into());
            }
        };

        self.logger.info(
            &format!("User '{}' added to organization '{}'", display_name, org.id),
            Some(&Self::meta(&[("org", org.id.as_str()), ("user_id", user_id.as_str())])),
        );
        Ok(user_id)
    }

    /// Update a member's display name and roles in `org`.
    ///
    /// The role map is recomputed over the organization's vocabulary and
    /// merged into a snapshot of the user's current map, so `access` and
    /// `principal` are carried over untouched.
    pub async fn update_user_details(&self, org: &Organization, user: &User, form: &UserForm) -> Result<User> {
        if !user.is_member_of(&org.id) {
            return Err(RoleMembershipError {
                user_id: user.id.clone(),
                org_id: org.id.clone(),
            }
            .into());
        }

        let existing = user.roles_for(&org.id).cloned().unwrap_or_default();
        let selected: HashSet<String> = form.roles.iter().cloned().collect();
        let computed = self
            .engine
            .compute_roles(&org.roles, &selected, AssignmentMode::Editing);

        let mut updated = user.clone();
        updated.display_name = form.display_name();
        updated.roles.insert(org.id.clone(), existing.merged(&computed));

        self.save(updated).await
    }

    /// Update only the display name
    pub async fn update_user_name(&self, user: &User, form: &UserForm) -> Result<User> {
        let mut updated = user.clone();
        updated.display_name = form.display_name();
        self.save(updated).await
    }

    /// Set the photo URL after an upload completed
    pub async fn update_user_photo_url(&self, user: &User, file_url: &str) -> Result<User> {
        let mut updated = user.clone();
        updated.photo_url = Some(file_url.to_string());
        self.save(updated).await
    }

    /// Ask the authentication provider to send a password reset email
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.resetter.reset_password(email).await?;
        self.logger.info(&format!("Password reset requested for '{}'", email), None);
        Ok(())
    }

    async fn save(&self, user: User) -> Result<User> {
        user.validate()?;
        self.updater.update_user(user.clone()).await?;
        self.logger.debug(&format!("User '{}' updated", user.id), None);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockPasswordResetter, MockUserCreator, MockUserUpdater};
    use serde_json::json;
    use shared::{ClmError, NullLogger, RemoteCallError, RoleMap, StoreError};

    fn org() -> Organization {
        Organization::new("acme", vec!["admin".to_string(), "editor".to_string()]).unwrap()
    }

    fn form(roles: &[&str]) -> UserForm {
        UserForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            phone: Some("+254700000000".to_string()),
            roles: roles.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn member() -> User {
        User::new("u1", "Old Name").with_org("acme").with_roles(
            "acme",
            RoleMap::new()
                .with("admin", true)
                .with("editor", false)
                .with("access", true)
                .with("principal", true),
        )
    }

    fn service(creator: MockUserCreator, updater: MockUserUpdater, resetter: MockPasswordResetter) -> UserAdminService {
        UserAdminService::new(
            Arc::new(NullLogger),
            Arc::new(creator),
            Arc::new(updater),
            Arc::new(resetter),
        )
    }

    #[tokio::test]
    async fn test_add_user_sends_computed_payload() {
        let mut creator = MockUserCreator::new();
        creator
            .expect_create_user()
            .withf(|payload: &CreateUserPayload| {
                serde_json::to_value(payload).unwrap()["roles"]
                    == json!({
                        "acme": {"admin": false, "editor": true, "access": false, "principal": false},
                        "access": true
                    })
                    && payload.display_name == "Ada Lovelace"
                    && payload.uid.is_empty()
            })
            .times(1)
            .returning(|_| Ok("user-7".to_string()));

        let service = service(creator, MockUserUpdater::new(), MockPasswordResetter::new());
        let user_id = service
            .add_user_to_org(&org(), &form(&["editor", "ghost"]))
            .await
            .unwrap();

        assert_eq!(user_id, "user-7");
    }

    #[tokio::test]
    async fn test_add_user_propagates_rejection() {
        let mut creator = MockUserCreator::new();
        creator
            .expect_create_user()
            .times(1)
            .returning(|_| Err(RemoteCallError::new("createNewUser", "email exists")));

        let service = service(creator, MockUserUpdater::new(), MockPasswordResetter::new());
        let result = service.add_user_to_org(&org(), &form(&[])).await;

        assert!(matches!(result, Err(ClmError::RemoteCall(ref e)) if e.message == "email exists"));
    }

    #[tokio::test]
    async fn test_update_details_keeps_reserved_flags() {
        let mut updater = MockUserUpdater::new();
        updater.expect_update_user().times(1).returning(|_| Ok(()));

        let service = service(MockUserCreator::new(), updater, MockPasswordResetter::new());
        let updated = service
            .update_user_details(&org(), &member(), &form(&["editor", "ghost"]))
            .await
            .unwrap();

        assert_eq!(updated.display_name, "Ada Lovelace");
        assert_eq!(
            serde_json::to_value(updated.roles_for("acme").unwrap()).unwrap(),
            json!({"admin": false, "editor": true, "access": true, "principal": true})
        );
    }

    #[tokio::test]
    async fn test_update_details_leaves_input_user_untouched() {
        let mut updater = MockUserUpdater::new();
        updater.expect_update_user().returning(|_| Ok(()));

        let service = service(MockUserCreator::new(), updater, MockPasswordResetter::new());
        let original = member();
        service
            .update_user_details(&org(), &original, &form(&[]))
            .await
            .unwrap();

        assert_eq!(original, member());
    }

    #[tokio::test]
    async fn test_update_details_rejects_non_member() {
        let mut updater = MockUserUpdater::new();
        updater.expect_update_user().never();

        let service = service(MockUserCreator::new(), updater, MockPasswordResetter::new());
        let outsider = User::new("u9", "Outsider").with_org("beta");
        let result = service.update_user_details(&org(), &outsider, &form(&["admin"])).await;

        assert!(matches!(result, Err(ClmError::RoleMembership(_))));
    }

    #[tokio::test]
    async fn test_update_details_store_fault_propagates() {
        let mut updater = MockUserUpdater::new();
        updater
            .expect_update_user()
            .returning(|_| Err(StoreError::Unavailable("deadline exceeded".to_string())));

        let service = service(MockUserCreator::new(), updater, MockPasswordResetter::new());
        let result = service.update_user_details(&org(), &member(), &form(&[])).await;

        assert!(matches!(result, Err(ClmError::Store(StoreError::Unavailable(_)))));
    }

    #[tokio::test]
    async fn test_update_name_only() {
        let mut updater = MockUserUpdater::new();
        updater
            .expect_update_user()
            .withf(|user: &User| user.display_name == "Ada Lovelace")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(MockUserCreator::new(), updater, MockPasswordResetter::new());
        let updated = service.update_user_name(&member(), &form(&[])).await.unwrap();

        assert_eq!(updated.roles, member().roles);
    }

    #[tokio::test]
    async fn test_update_photo_url() {
        let mut updater = MockUserUpdater::new();
        updater.expect_update_user().times(1).returning(|_| Ok(()));

        let service = service(MockUserCreator::new(), updater, MockPasswordResetter::new());
        let updated = service
            .update_user_photo_url(&member(), "https://cdn.example.com/u1.png")
            .await
            .unwrap();

        assert_eq!(updated.photo_url.as_deref(), Some("https://cdn.example.com/u1.png"));
    }

    #[tokio::test]
    async fn test_password_reset_delegates() {
        let mut resetter = MockPasswordResetter::new();
        resetter
            .expect_reset_password()
            .withf(|email: &str| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(MockUserCreator::new(), MockUserUpdater::new(), resetter);
        service.request_password_reset("ada@example.com").await.unwrap();
    }
}
