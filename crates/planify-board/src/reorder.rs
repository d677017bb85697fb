//! Local Reorder
//!
//! Applies cross-column moves while the pointer hovers, so the board shows
//! the prospective result before the drop. Same-column reordering waits for
//! the drop. Nothing here talks to the server.

use crate::model::{Board, ColumnId, TaskId};
use crate::session::DragSession;

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Empty space in a column
    Column(ColumnId),
    /// Another card
    Task(TaskId),
}

impl DropTarget {
    /// Column the target belongs to, if it still exists.
    pub fn resolve_column(&self, board: &Board) -> Option<ColumnId> {
        match *self {
            DropTarget::Column(id) => board.column(id).map(|c| c.id),
            DropTarget::Task(id) => board.find_column_containing(id).map(|c| c.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    Moved { to_column: ColumnId, index: usize },
    Unchanged,
    /// Active task or target no longer on the board
    Ignored,
}

/// Handle one pointer-over event during a drag.
pub fn hover(board: &mut Board, session: &DragSession, target: DropTarget) -> HoverOutcome {
    let active = session.active_task_id;
    if target == DropTarget::Task(active) {
        return HoverOutcome::Unchanged;
    }

    let Some(current) = board.find_column_containing(active).map(|c| c.id) else {
        return HoverOutcome::Ignored;
    };
    let Some(dest) = target.resolve_column(board) else {
        return HoverOutcome::Ignored;
    };
    if dest == current {
        return HoverOutcome::Unchanged;
    }

    let index = insertion_index(board, dest, target);
    if board.move_task(active, current, dest, index) {
        log::debug!("[DND] hover moved task={} {} -> {} @{}", active, current, dest, index);
        HoverOutcome::Moved { to_column: dest, index }
    } else {
        HoverOutcome::Ignored
    }
}

/// Hovered card's index, or the end of the column for column targets.
pub(crate) fn insertion_index(board: &Board, dest: ColumnId, target: DropTarget) -> usize {
    let Some(col) = board.column(dest) else {
        return 0;
    };
    match target {
        DropTarget::Task(id) => col.index_of(id).unwrap_or(col.tasks.len()),
        DropTarget::Column(_) => col.tasks.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{board, ids};

    fn session(b: &Board, task: TaskId) -> DragSession {
        DragSession::capture(b, task).unwrap()
    }

    #[test]
    fn test_hover_other_column_body_appends() {
        let mut b = board(&[(1, "Scheduled", &[1, 2]), (2, "Done", &[3])]);
        let s = session(&b, 1);

        let out = hover(&mut b, &s, DropTarget::Column(2));
        assert_eq!(out, HoverOutcome::Moved { to_column: 2, index: 1 });
        assert_eq!(ids(&b, 1), vec![2]);
        assert_eq!(ids(&b, 2), vec![3, 1]);
    }

    #[test]
    fn test_hover_task_in_other_column_takes_its_index() {
        let mut b = board(&[(1, "A", &[1, 2]), (2, "B", &[3, 4, 5])]);
        let s = session(&b, 2);

        hover(&mut b, &s, DropTarget::Task(4));
        assert_eq!(ids(&b, 2), vec![3, 2, 4, 5]);
        assert_eq!(ids(&b, 1), vec![1]);
    }

    #[test]
    fn test_hover_same_column_defers() {
        let mut b = board(&[(1, "A", &[1, 2, 3])]);
        let before = b.clone();
        let s = session(&b, 1);

        assert_eq!(hover(&mut b, &s, DropTarget::Task(3)), HoverOutcome::Unchanged);
        assert_eq!(hover(&mut b, &s, DropTarget::Column(1)), HoverOutcome::Unchanged);
        assert_eq!(hover(&mut b, &s, DropTarget::Task(1)), HoverOutcome::Unchanged);
        assert_eq!(b, before);
    }

    #[test]
    fn test_hover_follows_live_moves() {
        let mut b = board(&[(1, "A", &[1]), (2, "B", &[]), (3, "C", &[9])]);
        let s = session(&b, 1);

        hover(&mut b, &s, DropTarget::Column(2));
        hover(&mut b, &s, DropTarget::Task(9));
        assert!(ids(&b, 1).is_empty());
        assert!(ids(&b, 2).is_empty());
        assert_eq!(ids(&b, 3), vec![1, 9]);
        assert!(!b.contains_duplicates());
    }

    #[test]
    fn test_hover_stale_references_ignored() {
        let mut b = board(&[(1, "A", &[1]), (2, "B", &[])]);
        let s = session(&b, 1);

        assert_eq!(hover(&mut b, &s, DropTarget::Column(77)), HoverOutcome::Ignored);
        assert_eq!(hover(&mut b, &s, DropTarget::Task(77)), HoverOutcome::Ignored);

        b.columns[0].tasks.clear();
        assert_eq!(hover(&mut b, &s, DropTarget::Column(2)), HoverOutcome::Ignored);
    }
}
