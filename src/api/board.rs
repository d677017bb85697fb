//! Board Persistence
//!
//! `BoardApi` over REST, used by the board reconciler.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use planify_board::{Board, BoardApi, ColumnId, ProjectId, Task, TaskId};

use super::{ApiClient, ApiError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveArgs {
    status_id: ColumnId,
    position: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskArgs<'a> {
    status_id: ColumnId,
    title: &'a str,
}

#[async_trait(?Send)]
impl BoardApi for ApiClient {
    type Error = ApiError;

    async fn move_task(&self, task_id: TaskId, column_id: ColumnId, index: usize) -> Result<(), ApiError> {
        let args = MoveArgs { status_id: column_id, position: i32::try_from(index).unwrap_or(i32::MAX) };
        self.send_unit(Method::PATCH, &format!("/tasks/{}/move", task_id), &args).await
    }

    async fn fetch_board(&self, project_id: ProjectId) -> Result<Board, ApiError> {
        Ok(self.get_project(project_id).await?.board)
    }

    async fn create_task(&self, project_id: ProjectId, column_id: ColumnId, title: &str) -> Result<Task, ApiError> {
        let args = CreateTaskArgs { status_id: column_id, title: title.trim() };
        self.send_json(Method::POST, &format!("/projects/{}/tasks", project_id), &args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_body_shape() {
        let body = serde_json::to_string(&MoveArgs { status_id: 3, position: 0 }).unwrap();
        assert_eq!(body, r#"{"statusId":3,"position":0}"#);
    }
}
