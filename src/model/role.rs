use super::{key, lenient, Resource};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_name: Option<String>,
    pub role_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRole {
    #[serde(deserialize_with = "lenient::string")]
    pub role_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role_description: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleChanges {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role_description: Option<String>,
}

impl From<NewRole> for Role {
    fn from(new: NewRole) -> Self {
        Role {
            role_name: Some(new.role_name),
            role_description: Some(new.role_description),
        }
    }
}

impl Resource for Role {
    type New = NewRole;
    type Changes = RoleChanges;

    const COLLECTION: &'static str = "roles";
    const REQUIRED: &'static [&'static str] = &["roleName", "roleDescription"];
    const NATURAL_KEY: &'static [&'static str] = &["roleName"];
    const DUPLICATE_MESSAGE: &'static str = "role name is already exists";

    fn unique_key(&self) -> Option<Vec<(String, serde_json::Value)>> {
        key("roleName", &self.role_name)
    }
}
