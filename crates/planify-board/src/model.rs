//! Board Model
//!
//! In-memory columns and ordered task lists for one project's board.
//! Mutations only touch the columns involved, so untouched columns keep
//! their identity for keyed re-rendering.

use serde::{Deserialize, Deserializer, Serialize};

pub type TaskId = u32;
pub type ColumnId = u32;
pub type ProjectId = u32;

/// Task priority as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(s))
    }
}

/// Person shown on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Server position within the column; provisional until a commit is confirmed
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub attachments_count: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assignees: Vec<Assignee>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            position: 0,
            comments_count: 0,
            attachments_count: 0,
            assignees: Vec::new(),
        }
    }
}

/// A workflow stage ("status" on the server)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self { id, title: title.into(), tasks: Vec::new() }
    }

    pub fn index_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    fn resequence(&mut self) {
        for (pos, task) in self.tasks.iter_mut().enumerate() {
            task.position = pos as i32;
        }
    }
}

/// A project's full column/task structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// (column index, task index) of a task
    pub fn locate(&self, task_id: TaskId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, col)| col.index_of(task_id).map(|ti| (ci, ti)))
    }

    /// The unique column holding the task. `None` means the reference is stale.
    pub fn find_column_containing(&self, task_id: TaskId) -> Option<&Column> {
        self.locate(task_id).map(|(ci, _)| &self.columns[ci])
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.locate(task_id).map(|(ci, ti)| &self.columns[ci].tasks[ti])
    }

    /// Move a task between (or within) columns.
    ///
    /// `to_index` is clamped to `[0, len]` of the destination after removal.
    /// Returns `false` without touching anything if the task is not in
    /// `from_column_id` or the destination does not exist.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        to_index: usize,
    ) -> bool {
        let (Some(from), Some(to)) = (self.column_index(from_column_id), self.column_index(to_column_id)) else {
            return false;
        };
        let Some(from_index) = self.columns[from].index_of(task_id) else {
            return false;
        };

        let task = self.columns[from].tasks.remove(from_index);
        let dest = &mut self.columns[to].tasks;
        let at = to_index.min(dest.len());
        dest.insert(at, task);

        self.columns[to].resequence();
        if from != to {
            self.columns[from].resequence();
        }
        true
    }

    /// Array-move permutation inside one column
    pub fn reorder_within(&mut self, column_id: ColumnId, from: usize, to: usize) -> bool {
        let Some(ci) = self.column_index(column_id) else {
            return false;
        };
        let Some(task_id) = self.columns[ci].tasks.get(from).map(|t| t.id) else {
            return false;
        };
        self.move_task(task_id, column_id, column_id, to)
    }

    /// Put a freshly created task at its server position (clamped).
    pub fn insert_task(&mut self, column_id: ColumnId, task: Task) -> bool {
        if self.locate(task.id).is_some() {
            return false;
        }
        let Some(ci) = self.column_index(column_id) else {
            return false;
        };
        let col = &mut self.columns[ci];
        let at = (task.position.max(0) as usize).min(col.tasks.len());
        col.tasks.insert(at, task);
        col.resequence();
        true
    }

    /// Order every column by server position and renumber densely.
    ///
    /// The backend does not sort tasks inside a status, so this runs after
    /// every fetch.
    pub fn normalize(&mut self) {
        for col in &mut self.columns {
            col.tasks.sort_by_key(|t| t.position);
            col.resequence();
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.columns.iter().flat_map(|c| c.tasks.iter().map(|t| t.id)).collect()
    }

    pub fn contains_duplicates(&self) -> bool {
        let mut ids = self.task_ids();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        ids.len() != total
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Columns given as (id, title, task ids)
    pub(crate) fn board(layout: &[(ColumnId, &str, &[TaskId])]) -> Board {
        let columns = layout
            .iter()
            .map(|(id, title, tasks)| Column {
                id: *id,
                title: title.to_string(),
                tasks: tasks
                    .iter()
                    .enumerate()
                    .map(|(pos, tid)| {
                        let mut t = Task::new(*tid, format!("Task {}", tid));
                        t.position = pos as i32;
                        t
                    })
                    .collect(),
            })
            .collect();
        Board::new(columns)
    }

    pub(crate) fn ids(board: &Board, column_id: ColumnId) -> Vec<TaskId> {
        board.column(column_id).unwrap().tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_find_column_containing() {
        let b = board(&[(1, "Scheduled", &[10, 11]), (2, "Done", &[12])]);
        assert_eq!(b.find_column_containing(11).map(|c| c.id), Some(1));
        assert_eq!(b.find_column_containing(12).map(|c| c.id), Some(2));
        assert!(b.find_column_containing(99).is_none());
    }

    #[test]
    fn test_move_across_columns() {
        let mut b = board(&[(1, "Scheduled", &[10, 11]), (2, "Done", &[20])]);
        assert!(b.move_task(10, 1, 2, 0));

        assert_eq!(ids(&b, 1), vec![11]);
        assert_eq!(ids(&b, 2), vec![10, 20]);
        assert_eq!(b.column(2).unwrap().tasks[1].position, 1);
        assert_eq!(b.column(1).unwrap().tasks[0].position, 0);
    }

    #[test]
    fn test_move_clamps_index() {
        let mut b = board(&[(1, "A", &[10]), (2, "B", &[20, 21])]);
        assert!(b.move_task(10, 1, 2, 99));
        assert_eq!(ids(&b, 2), vec![20, 21, 10]);
    }

    #[test]
    fn test_move_stale_reference_is_noop() {
        let mut b = board(&[(1, "A", &[10]), (2, "B", &[])]);
        let before = b.clone();
        assert!(!b.move_task(10, 2, 1, 0));
        assert!(!b.move_task(99, 1, 2, 0));
        assert!(!b.move_task(10, 1, 7, 0));
        assert_eq!(b, before);
    }

    #[test]
    fn test_reorder_within_is_permutation() {
        let mut b = board(&[(1, "A", &[1, 2, 3, 4, 5])]);
        assert!(b.reorder_within(1, 1, 3));
        assert_eq!(ids(&b, 1), vec![1, 3, 4, 2, 5]);

        assert!(b.reorder_within(1, 4, 0));
        assert_eq!(ids(&b, 1), vec![5, 1, 3, 4, 2]);
        assert!(!b.contains_duplicates());
    }

    #[test]
    fn test_no_duplicates_after_many_moves() {
        let mut b = board(&[(1, "A", &[1, 2, 3]), (2, "B", &[4, 5]), (3, "C", &[])]);
        let moves = [(1, 1, 3, 0), (4, 2, 1, 1), (2, 1, 2, 5), (1, 3, 3, 0), (5, 2, 3, 1), (3, 1, 1, 0)];
        for (task, from, to, idx) in moves {
            b.move_task(task, from, to, idx);
            assert!(!b.contains_duplicates());
            assert_eq!(b.task_count(), 5);
        }
    }

    #[test]
    fn test_emptied_column_stays() {
        let mut b = board(&[(1, "A", &[1]), (2, "B", &[])]);
        b.move_task(1, 1, 2, 0);
        assert_eq!(b.columns.len(), 2);
        assert!(b.column(1).unwrap().tasks.is_empty());
    }

    #[test]
    fn test_insert_task_uses_server_position() {
        let mut b = board(&[(1, "A", &[1, 2])]);
        let mut t = Task::new(3, "new");
        t.position = 0;
        assert!(b.insert_task(1, t.clone()));
        assert_eq!(ids(&b, 1), vec![3, 1, 2]);
        // duplicate id rejected
        assert!(!b.insert_task(1, t));
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": 4, "name": "Website",
            "columns": [
                {"id": 1, "title": "Scheduled", "tasks": [
                    {"id": 8, "title": "b", "description": "", "position": 1, "assignees": []},
                    {"id": 7, "title": "a", "description": "", "position": 0, "assignees": null, "priority": "High"}
                ]},
                {"id": 2, "title": "Done", "tasks": null}
            ]
        }"#;
        let b: Board = serde_json::from_str::<Board>(json).unwrap().normalized();
        assert_eq!(ids(&b, 1), vec![7, 8]);
        assert!(b.column(2).unwrap().tasks.is_empty());
        assert_eq!(b.task(7).unwrap().priority, Some(Priority::High));
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("urgent"), Some(Priority::Urgent));
        assert_eq!(Priority::parse("none"), None);
    }
}
