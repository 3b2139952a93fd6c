use super::{dates, key, lenient, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn active() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub employee_email: Option<String>,
    pub employee_phone_number: Option<String>,
    pub department_id: Option<String>,
    pub role_id: Option<String>,
    pub address: Option<String>,
    #[serde(default, with = "dates")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default = "active")]
    pub is_employee_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[serde(deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub employee_email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub employee_phone_number: String,
    #[serde(deserialize_with = "lenient::string")]
    pub department_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, with = "dates")]
    pub date_of_birth: Option<DateTime<Utc>>,
}

/// Update body. Names are taken from `firstNameUpdate` / `lastNameUpdate` so they do not
/// collide with the `firstName` / `lastName` lookup in the query string.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeChanges {
    #[serde(rename(serialize = "firstName", deserialize = "firstNameUpdate"))]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub first_name: Option<String>,
    #[serde(rename(serialize = "lastName", deserialize = "lastNameUpdate"))]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub employee_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub employee_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub department_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    #[serde(default, with = "dates")]
    pub date_of_birth: Option<DateTime<Utc>>,
}

impl From<NewEmployee> for Employee {
    fn from(new: NewEmployee) -> Self {
        Employee {
            first_name: Some(new.first_name),
            last_name: Some(new.last_name),
            employee_email: Some(new.employee_email),
            employee_phone_number: Some(new.employee_phone_number),
            department_id: Some(new.department_id),
            role_id: Some(new.role_id),
            address: Some(new.address),
            date_of_birth: new.date_of_birth,
            is_employee_active: true,
        }
    }
}

impl Resource for Employee {
    type New = NewEmployee;
    type Changes = EmployeeChanges;

    const COLLECTION: &'static str = "employees";
    const REQUIRED: &'static [&'static str] = &[
        "firstName",
        "lastName",
        "employeeEmail",
        "employeePhoneNumber",
        "departmentId",
        "roleId",
        "address",
        "dateOfBirth",
    ];
    const NATURAL_KEY: &'static [&'static str] = &["firstName", "lastName"];
    const DUPLICATE_MESSAGE: &'static str = "the employee is already exist";

    fn unique_key(&self) -> Option<Vec<(String, serde_json::Value)>> {
        key("employeeEmail", &self.employee_email)
    }
}
