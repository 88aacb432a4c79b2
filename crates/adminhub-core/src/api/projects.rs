use serde_json::{json, Value};

use super::client::ApiClient;
use super::params::{endpoint_with_query, ListParams};
use super::transport::Method;
use super::ApiError;
use crate::models::{Ack, AssignmentAction, Project, ProjectForm, ProjectPage, ProjectStats, ProjectStatus};

impl ApiClient {
    pub async fn list_projects(&self, params: &ListParams) -> Result<ProjectPage, ApiError> {
        let endpoint = endpoint_with_query("projects", params)?;
        self.fetch(&endpoint).await
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, ApiError> {
        self.fetch(&format!("projects/{}", id)).await
    }

    pub async fn project_stats(&self) -> Result<ProjectStats, ApiError> {
        self.fetch("projects?stats=1").await
    }

    pub async fn create_project(&self, form: &ProjectForm) -> Result<Project, ApiError> {
        self.send(Method::Post, "projects", Some(form)).await?.into_data()
    }

    /// Acknowledged rather than decoded: status-only and assignment updates
    /// answer with different `data` shapes.
    pub async fn update_project(&self, id: i64, form: &ProjectForm) -> Result<Ack, ApiError> {
        self.send_ack(Method::Patch, &format!("projects/{}", id), Some(form)).await
    }

    pub async fn update_project_status(&self, id: i64, status: ProjectStatus) -> Result<Ack, ApiError> {
        let body = json!({ "status": status });
        self.send_ack(Method::Patch, &format!("projects/{}", id), Some(&body)).await
    }

    /// Update the status, then reload project stats once it is accepted.
    pub async fn change_project_status(&self, id: i64, status: ProjectStatus) -> Result<ProjectStats, ApiError> {
        self.update_project_status(id, status).await?;
        self.project_stats().await
    }

    pub async fn delete_project(&self, id: i64) -> Result<Ack, ApiError> {
        self.send_ack::<Value>(Method::Delete, &format!("projects/{}", id), None).await
    }

    pub async fn assign_personnel(
        &self,
        project_id: i64,
        personnel_id: i64,
        role: Option<&str>,
    ) -> Result<Ack, ApiError> {
        let body = AssignmentAction::Assign { personnel_id, role };
        self.send_ack(Method::Patch, &format!("projects/{}", project_id), Some(&body)).await
    }

    pub async fn unassign_personnel(&self, project_id: i64, personnel_id: i64) -> Result<Ack, ApiError> {
        let body = AssignmentAction::Unassign { personnel_id };
        self.send_ack(Method::Patch, &format!("projects/{}", project_id), Some(&body)).await
    }
}
