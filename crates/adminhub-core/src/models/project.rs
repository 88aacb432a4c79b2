use serde::{Deserialize, Serialize};

use super::{Pagination, ProjectStatus};
use crate::utils::parse_date;

/// A piece of client work and the people assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub status: ProjectStatus,
    pub client_id: Option<i64>,
    pub client_company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub personnel: Vec<ProjectAssignment>,
}

impl Project {
    /// Start date, if present and parseable
    pub fn starts_on(&self) -> Option<chrono::NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }

    /// End date, if present and parseable
    pub fn ends_on(&self) -> Option<chrono::NaiveDate> {
        self.end_date.as_deref().and_then(parse_date)
    }
}

/// A staff member linked to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ProjectAssignment {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub role: Option<String>,
}

/// Counts per project status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(default)]
pub struct ProjectStats {
    pub total: u64,
    pub planning_count: u64,
    pub development_count: u64,
    pub testing_count: u64,
    pub completed_count: u64,
    pub paused_count: u64,
    pub cancelled_count: u64,
}

impl ProjectStats {
    pub fn count_for(&self, status: ProjectStatus) -> u64 {
        match status {
            ProjectStatus::Planning => self.planning_count,
            ProjectStatus::Development => self.development_count,
            ProjectStatus::Testing => self.testing_count,
            ProjectStatus::Completed => self.completed_count,
            ProjectStatus::Paused => self.paused_count,
            ProjectStatus::Cancelled => self.cancelled_count,
            ProjectStatus::Unknown => 0,
        }
    }
}

/// `data` of the project list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPage {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub pagination: Pagination,
    pub stats: Option<ProjectStats>,
}

/// Create/update body; unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// PATCH body linking or unlinking a staff member on `projects/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AssignmentAction<'a> {
    Assign {
        personnel_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        role: Option<&'a str>,
    },
    Unassign {
        personnel_id: i64,
    },
}
