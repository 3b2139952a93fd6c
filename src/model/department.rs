use super::{key, lenient, Resource};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    #[serde(deserialize_with = "lenient::string")]
    pub department_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentChanges {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub department_name: Option<String>,
}

impl From<NewDepartment> for Department {
    fn from(new: NewDepartment) -> Self {
        Department {
            department_name: Some(new.department_name),
        }
    }
}

impl Resource for Department {
    type New = NewDepartment;
    type Changes = DepartmentChanges;

    const COLLECTION: &'static str = "departments";
    const REQUIRED: &'static [&'static str] = &["departmentName"];
    const NATURAL_KEY: &'static [&'static str] = &["departmentName"];
    const DUPLICATE_MESSAGE: &'static str = "department is already exists";

    fn unique_key(&self) -> Option<Vec<(String, serde_json::Value)>> {
        key("departmentName", &self.department_name)
    }
}
