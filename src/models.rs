//! Frontend Models
//!
//! Data structures matching backend JSON.

use serde::{Deserialize, Serialize};

pub use planify_board::{Board, Priority};

/// Project list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET /projects/:id`: header data plus the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "due_date")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub team: Option<Vec<User>>,
    #[serde(flatten)]
    pub board: Board,
}

impl ProjectDetail {
    pub fn team(&self) -> &[User] {
        self.team.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Row in "My Tasks"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTask {
    pub id: u32,
    pub title: String,
    pub project_id: u32,
    pub project_name: String,
    pub status_name: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub attachments_count: u32,
}

impl UserTask {
    pub fn is_done(&self) -> bool {
        self.status_name == DONE_STATUS
    }
}

/// Status name the backend uses for finished work
pub const DONE_STATUS: &str = "Done";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: u32,
    pub file_name: String,
    pub size: u64,
    pub url: String,
}

impl Attachment {
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size as f64 / 1024.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    pub id: u32,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub author: Option<CommentAuthor>,
}

impl TaskComment {
    pub fn author_name(&self) -> &str {
        self.author.as_ref().and_then(|a| a.name.as_deref()).filter(|n| !n.is_empty()).unwrap_or("Someone")
    }
}

/// `GET /tasks/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub project_id: u32,
    pub project_name: String,
    pub status_id: u32,
    pub status_name: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignees: Option<Vec<User>>,
    #[serde(default)]
    pub collaborators: Option<Vec<User>>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default)]
    pub comments: Option<Vec<TaskComment>>,
}

impl TaskDetail {
    pub fn is_done(&self) -> bool {
        self.status_name == DONE_STATUS
    }

    pub fn assignees(&self) -> &[User] {
        self.assignees.as_deref().unwrap_or_default()
    }

    pub fn collaborators(&self) -> &[User] {
        self.collaborators.as_deref().unwrap_or_default()
    }

    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    pub fn comments(&self) -> &[TaskComment] {
        self.comments.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub notifications_assign: bool,
    #[serde(default)]
    pub notifications_due_date: bool,
    #[serde(default)]
    pub notifications_comments: bool,
    /// "Automatic", "Light" or "Dark"
    #[serde(default = "default_theme")]
    pub appearance_theme: String,
}

fn default_theme() -> String {
    "Automatic".to_string()
}

pub const THEME_OPTIONS: &[&str] = &["Automatic", "Light", "Dark"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: u32,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub task_title: Option<String>,
}

/// `GET /me/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub assigned_count: u32,
    #[serde(default)]
    pub collaborator_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub project_count: u32,
    #[serde(default)]
    pub recent_activity: Option<Vec<RecentActivity>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_detail_carries_board() {
        let json = r#"{
            "id": 3, "name": "Launch", "description": "Q3",
            "due_date": null, "createdAt": "2024-01-01T00:00:00Z",
            "team": [{"id": 1, "name": "Ada", "email": "ada@example.com"}],
            "columns": [{"id": 1, "title": "Scheduled", "tasks": null}]
        }"#;
        let detail: ProjectDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.team().len(), 1);
        assert_eq!(detail.board.columns.len(), 1);
        assert!(detail.board.columns[0].tasks.is_empty());
    }

    #[test]
    fn test_task_detail_null_lists() {
        let json = r#"{
            "id": 9, "title": "Fix login", "description": null,
            "projectId": 3, "projectName": "Launch",
            "statusId": 2, "statusName": "Done", "dueDate": null, "priority": "Urgent",
            "assignees": null, "collaborators": null, "attachments": null, "comments": null
        }"#;
        let task: TaskDetail = serde_json::from_str(json).unwrap();
        assert!(task.is_done());
        assert!(task.assignees().is_empty());
        assert_eq!(task.priority, Some(Priority::Urgent));
    }

    #[test]
    fn test_comment_author_fallback() {
        let c = TaskComment { id: 1, text: "hi".into(), created_at: "2024-01-01T00:00:00Z".into(), author: None };
        assert_eq!(c.author_name(), "Someone");
    }

    #[test]
    fn test_attachment_size_label() {
        let a = Attachment { id: 1, file_name: "a.pdf".into(), size: 2048, url: "/uploads/a.pdf".into() };
        assert_eq!(a.size_label(), "2.0 KB");
    }
}
