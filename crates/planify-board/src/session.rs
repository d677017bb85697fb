//! Drag Session
//!
//! Idle -> Dragging -> Idle. Drop, escape and unmount all end the session
//! the same way; the commit step re-validates the target on its own.

use crate::model::{Board, ColumnId, TaskId};

/// The task being dragged and where it started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub active_task_id: TaskId,
    pub origin_column_id: ColumnId,
    pub origin_index: usize,
}

impl DragSession {
    /// Capture the task's current placement. `None` if it cannot be located.
    pub fn capture(board: &Board, task_id: TaskId) -> Option<Self> {
        let (ci, ti) = board.locate(task_id)?;
        Some(Self {
            active_task_id: task_id,
            origin_column_id: board.columns[ci].id,
            origin_index: ti,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `task_id`. Silently stays put if the task is unknown.
    pub fn begin(&mut self, board: &Board, task_id: TaskId) -> Option<&DragSession> {
        match DragSession::capture(board, task_id) {
            Some(session) => {
                log::debug!("[DND] begin task={} origin={}", task_id, session.origin_column_id);
                self.session = Some(session);
            }
            None => log::debug!("[DND] begin ignored, task {} not on board", task_id),
        }
        self.session.as_ref()
    }

    /// Clear the session, returning it if one was active.
    pub fn end(&mut self) -> Option<DragSession> {
        self.session.take()
    }

    pub fn current(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::board;

    #[test]
    fn test_begin_captures_origin() {
        let b = board(&[(1, "Scheduled", &[10, 11]), (2, "Done", &[])]);
        let mut tracker = DragTracker::new();

        let s = *tracker.begin(&b, 11).unwrap();
        assert_eq!(s, DragSession { active_task_id: 11, origin_column_id: 1, origin_index: 1 });
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_begin_unknown_task_stays_idle() {
        let b = board(&[(1, "Scheduled", &[10])]);
        let mut tracker = DragTracker::new();
        assert!(tracker.begin(&b, 42).is_none());
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_end_is_idempotent() {
        let b = board(&[(1, "Scheduled", &[10])]);
        let mut tracker = DragTracker::new();
        tracker.begin(&b, 10);

        assert!(tracker.end().is_some());
        assert!(tracker.end().is_none());
        assert!(tracker.current().is_none());
    }
}
