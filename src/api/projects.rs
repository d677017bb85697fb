//! Project Endpoints

use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiResult};
use crate::models::{Project, ProjectDetail};

/// Body of `POST /projects`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub due_date: Option<String>,
    pub team_ids: Vec<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DueDateArgs<'a> {
    due_date: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberArgs {
    user_id: u32,
}

impl ApiClient {
    pub async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        let projects: Option<Vec<Project>> = self.get_json("/projects").await?;
        Ok(projects.unwrap_or_default())
    }

    pub async fn get_project(&self, id: u32) -> ApiResult<ProjectDetail> {
        self.get_json(&format!("/projects/{}", id)).await
    }

    pub async fn create_project(&self, project: &NewProject) -> ApiResult<Project> {
        self.send_json(Method::POST, "/projects", project).await
    }

    /// An empty or missing date clears it
    pub async fn update_project_due_date(&self, id: u32, due_date: Option<&str>) -> ApiResult<()> {
        let due_date = due_date.map(str::trim).filter(|d| !d.is_empty());
        self.send_unit(Method::PATCH, &format!("/projects/{}/duedate", id), &DueDateArgs { due_date })
            .await
    }

    pub async fn add_project_member(&self, id: u32, user_id: u32) -> ApiResult<()> {
        self.send_unit(Method::POST, &format!("/projects/{}/members", id), &MemberArgs { user_id })
            .await
    }
}
