use super::{dates, is_blank, key, lenient, Resource};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    #[serde(default, with = "dates")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates")]
    pub end_date: Option<DateTime<Utc>>,
    pub project_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(deserialize_with = "lenient::string")]
    pub project_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub project_description: String,
    #[serde(default, with = "dates")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::string")]
    pub project_status: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChanges {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub project_description: Option<String>,
    #[serde(default, with = "dates")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub project_status: Option<String>,
}

impl From<NewProject> for Project {
    fn from(new: NewProject) -> Self {
        Project {
            project_name: Some(new.project_name),
            project_description: Some(new.project_description),
            start_date: new.start_date,
            end_date: new.end_date,
            project_status: Some(new.project_status),
        }
    }
}

impl Resource for Project {
    type New = NewProject;
    type Changes = ProjectChanges;

    const COLLECTION: &'static str = "projects";
    const REQUIRED: &'static [&'static str] =
        &["projectName", "projectDescription", "startDate", "endDate", "projectStatus"];
    const NATURAL_KEY: &'static [&'static str] = &["projectName"];
    const DUPLICATE_MESSAGE: &'static str = "Project name is already exist";

    fn unique_key(&self) -> Option<Vec<(String, serde_json::Value)>> {
        key("projectName", &self.project_name)
    }

    /// At least one of name, dates or status must be supplied; description alone is not enough.
    fn check_changes(changes: &ProjectChanges) -> Result<(), AppError> {
        if is_blank(&changes.project_name)
            && changes.start_date.is_none()
            && changes.end_date.is_none()
            && is_blank(&changes.project_status)
        {
            return Err(AppError::data_missing());
        }
        Ok(())
    }
}
