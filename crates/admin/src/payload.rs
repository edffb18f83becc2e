//! Create-user payload and the admin form it is built from

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use shared::{Profile, RoleMap, ACCESS_FLAG};

/// Values submitted by the add/edit user form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Role names ticked in the form
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserForm {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// `roles` object of the create-user payload.
///
/// Serializes as `{ "<orgId>": { ..role map.. }, "access": true }`. The
/// top-level `access` marker is unrelated to the `access` flag inside the
/// organization's role map, which starts out `false` for new users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRoles {
    pub org_id: String,
    pub org_roles: RoleMap,
    pub access: bool,
}

impl Serialize for CreateUserRoles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&self.org_id, &self.org_roles)?;
        map.serialize_entry(ACCESS_FLAG, &self.access)?;
        map.end()
    }
}

/// Argument of the remote `createNewUser` function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub display_name: String,
    pub orgs: Vec<String>,
    pub active_org: String,
    pub profile: Profile,
    pub roles: CreateUserRoles,
    /// Always empty; the backend assigns the account id
    pub uid: String,
    pub email: String,
}

impl CreateUserPayload {
    /// Build the payload for adding a user to `org_id` with an already
    /// computed role map
    pub fn new(org_id: &str, form: &UserForm, org_roles: RoleMap) -> Self {
        let email = form.email.clone().unwrap_or_default();
        Self {
            display_name: form.display_name(),
            orgs: vec![org_id.to_string()],
            active_org: org_id.to_string(),
            profile: Profile {
                phone: form.phone.clone().unwrap_or_default(),
                email: email.clone(),
            },
            roles: CreateUserRoles {
                org_id: org_id.to_string(),
                org_roles,
                access: true,
            },
            uid: String::new(),
            email,
        }
    }
}
