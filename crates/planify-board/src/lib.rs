//! Planify Board
//!
//! Kanban board model plus the drag-and-drop reconciliation used by the
//! project board view: optimistic local moves while dragging, one
//! persistence call per drop, full refetch when the server says no.

mod model;
mod session;
mod reorder;
mod commit;

pub use model::{Assignee, Board, Column, ColumnId, Priority, ProjectId, Task, TaskId};
pub use session::{DragSession, DragTracker};
pub use reorder::{hover, DropTarget, HoverOutcome};
pub use commit::{
    settle_drop, AbortReason, BoardApi, BoardStore, CommitOutcome, DropResolution, MoveRequest, Reconciler,
};
