//! Task Endpoints
//!
//! Detail page calls: fields, people, comments, attachments.
//! Board moves live in `board.rs`.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{file_form, ApiClient, ApiResult};
use crate::models::{Attachment, Priority, TaskComment, TaskDetail};

/// Partial update for `PATCH /tasks/:id`; `None` fields are left alone
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Some(None)` clears the date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
}

#[derive(Serialize)]
struct PriorityArgs {
    priority: Option<Priority>,
}

#[derive(Deserialize)]
struct PriorityResponse {
    #[serde(default)]
    priority: Option<Priority>,
}

#[derive(Serialize)]
struct PersonArgs<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct CommentArgs<'a> {
    text: &'a str,
}

impl ApiClient {
    pub async fn get_task(&self, id: u32) -> ApiResult<TaskDetail> {
        self.get_json(&format!("/tasks/{}", id)).await
    }

    /// Patch, then return the fresh detail
    pub async fn update_task_fields(&self, id: u32, patch: &TaskPatch) -> ApiResult<TaskDetail> {
        self.send_unit(Method::PATCH, &format!("/tasks/{}", id), patch).await?;
        self.get_task(id).await
    }

    /// Returns the priority the server saved
    pub async fn update_task_priority(&self, id: u32, priority: Option<Priority>) -> ApiResult<Option<Priority>> {
        let saved: PriorityResponse = self
            .send_json(Method::PATCH, &format!("/tasks/{}", id), &PriorityArgs { priority })
            .await?;
        Ok(saved.priority.or(priority))
    }

    /// `query` is an email or user name
    pub async fn add_assignee(&self, id: u32, query: &str) -> ApiResult<()> {
        self.send_unit(Method::POST, &format!("/tasks/{}/assignees", id), &PersonArgs { query: query.trim() })
            .await
    }

    pub async fn add_collaborator(&self, id: u32, query: &str) -> ApiResult<()> {
        self.send_unit(Method::POST, &format!("/tasks/{}/collaborators", id), &PersonArgs { query: query.trim() })
            .await
    }

    pub async fn list_comments(&self, id: u32) -> ApiResult<Vec<TaskComment>> {
        let comments: Option<Vec<TaskComment>> = self.get_json(&format!("/tasks/{}/comments", id)).await?;
        Ok(comments.unwrap_or_default())
    }

    pub async fn add_comment(&self, id: u32, text: &str) -> ApiResult<()> {
        self.send_unit(Method::POST, &format!("/tasks/{}/comments", id), &CommentArgs { text })
            .await
    }

    pub async fn list_attachments(&self, id: u32) -> ApiResult<Vec<Attachment>> {
        let files: Option<Vec<Attachment>> = self.get_json(&format!("/tasks/{}/attachments", id)).await?;
        Ok(files.unwrap_or_default())
    }

    pub async fn upload_attachment(&self, id: u32, file: &web_sys::File) -> ApiResult<serde_json::Value> {
        let form = file_form(file).await?;
        log::info!("[API] uploading {} to task {}", file.name(), id);
        self.send_form(&format!("/tasks/{}/attachments", id), form).await
    }
}
