//! Commit / Reconcile
//!
//! Runs once per drop: settles the final placement locally, sends exactly
//! one move to the server, and on failure replaces the whole board with a
//! fresh fetch.

use std::cell::RefCell;
use std::fmt;

use async_trait::async_trait;

use crate::model::{Board, ColumnId, ProjectId, Task, TaskId};
use crate::reorder::{insertion_index, DropTarget};
use crate::session::DragSession;

/// Persistence collaborator (the REST backend)
#[async_trait(?Send)]
pub trait BoardApi {
    type Error: fmt::Display;

    /// Reassign status and position of one task; the server closes gaps.
    async fn move_task(&self, task_id: TaskId, column_id: ColumnId, index: usize) -> Result<(), Self::Error>;

    async fn fetch_board(&self, project_id: ProjectId) -> Result<Board, Self::Error>;

    async fn create_task(&self, project_id: ProjectId, column_id: ColumnId, title: &str) -> Result<Task, Self::Error>;
}

/// Owner of the board the reconciler edits
pub trait BoardStore {
    /// `None` when the board is gone (view torn down).
    fn with_board_mut<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R>;

    fn replace_board(&self, board: Board) {
        if self.with_board_mut(|b| *b = board).is_none() {
            log::debug!("[BOARD] board gone, dropping refetched state");
        }
    }
}

impl BoardStore for RefCell<Board> {
    fn with_board_mut<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// The single persistence call a drop produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Released outside every column and card
    NoTarget,
    /// Target vanished from the board mid-drag
    StaleTarget,
    /// Dragged task vanished from the board mid-drag
    TaskMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResolution {
    Persist(MoveRequest),
    SelfDrop,
    Aborted(AbortReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// No session was active
    Idle,
    SelfDrop,
    Aborted(AbortReason),
    /// Server accepted the move; local state already matches
    Confirmed(MoveRequest),
    /// Server rejected the move; board replaced with a fresh fetch
    Reconciled { rejected: MoveRequest, reason: String },
    /// Move and refetch both failed; local state left as is
    Unresolved { rejected: MoveRequest, reason: String },
}

/// Finalize the placement for a drop (steps 1-3), without persisting.
///
/// Self-drops and aborted drops put the task back where the session found
/// it, undoing any live cross-column move.
pub fn settle_drop(board: &mut Board, session: &DragSession, target: Option<DropTarget>) -> DropResolution {
    let active = session.active_task_id;
    let Some(current) = board.find_column_containing(active).map(|c| c.id) else {
        return DropResolution::Aborted(AbortReason::TaskMissing);
    };

    let Some(target) = target else {
        restore_origin(board, session);
        return DropResolution::Aborted(AbortReason::NoTarget);
    };
    if target == DropTarget::Task(active) {
        restore_origin(board, session);
        return DropResolution::SelfDrop;
    }
    let Some(dest) = target.resolve_column(board) else {
        restore_origin(board, session);
        return DropResolution::Aborted(AbortReason::StaleTarget);
    };

    if dest == current {
        if let DropTarget::Task(over) = target {
            let col = board.column(dest);
            let from = col.and_then(|c| c.index_of(active));
            let to = col.and_then(|c| c.index_of(over));
            if let (Some(from), Some(to)) = (from, to) {
                // A card that arrived by live hover lands before `over`, as the
                // preview showed; only the origin column uses array-move order.
                let to = if dest != session.origin_column_id && from < to { to - 1 } else { to };
                if from != to {
                    board.reorder_within(dest, from, to);
                }
            }
        }
    } else {
        // pointer-over never landed in this column
        let index = insertion_index(board, dest, target);
        board.move_task(active, current, dest, index);
    }

    match board.column(dest).and_then(|c| c.index_of(active)) {
        Some(index) => DropResolution::Persist(MoveRequest { task_id: active, column_id: dest, index }),
        None => DropResolution::Aborted(AbortReason::TaskMissing),
    }
}

fn restore_origin(board: &mut Board, session: &DragSession) {
    let Some(current) = board.find_column_containing(session.active_task_id).map(|c| c.id) else {
        return;
    };
    let at_origin = current == session.origin_column_id
        && board.column(current).and_then(|c| c.index_of(session.active_task_id)) == Some(session.origin_index);
    if !at_origin {
        board.move_task(session.active_task_id, current, session.origin_column_id, session.origin_index);
    }
}

/// Drives commits and refreshes for one project's board
pub struct Reconciler<A> {
    api: A,
    project_id: ProjectId,
}

impl<A: BoardApi> Reconciler<A> {
    pub fn new(api: A, project_id: ProjectId) -> Self {
        Self { api, project_id }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Finish a drag. The caller has already ended its tracker and passes
    /// the session it got back.
    pub async fn commit_drop<S: BoardStore>(
        &self,
        store: &S,
        session: Option<DragSession>,
        target: Option<DropTarget>,
    ) -> CommitOutcome {
        let Some(session) = session else {
            return CommitOutcome::Idle;
        };

        let resolution = store
            .with_board_mut(|board| settle_drop(board, &session, target))
            .unwrap_or(DropResolution::Aborted(AbortReason::TaskMissing));

        match resolution {
            DropResolution::Persist(request) => self.persist(store, request).await,
            DropResolution::SelfDrop => CommitOutcome::SelfDrop,
            DropResolution::Aborted(reason) => {
                log::debug!("[BOARD] drop of task {} aborted: {:?}", session.active_task_id, reason);
                CommitOutcome::Aborted(reason)
            }
        }
    }

    /// Send one move; on failure replace the board with server truth.
    pub async fn persist<S: BoardStore>(&self, store: &S, request: MoveRequest) -> CommitOutcome {
        log::info!(
            "[BOARD] move task={} column={} index={}",
            request.task_id, request.column_id, request.index
        );
        let reason = match self.api.move_task(request.task_id, request.column_id, request.index).await {
            Ok(()) => return CommitOutcome::Confirmed(request),
            Err(e) => e.to_string(),
        };

        log::warn!("[BOARD] move of task {} failed ({}), refetching board", request.task_id, reason);
        match self.refresh(store).await {
            Ok(()) => CommitOutcome::Reconciled { rejected: request, reason },
            Err(e) => {
                log::error!("[BOARD] refetch after failed move also failed: {}", e);
                CommitOutcome::Unresolved { rejected: request, reason: format!("{}; refetch: {}", reason, e) }
            }
        }
    }

    /// Replace the local board wholesale with the server's.
    pub async fn refresh<S: BoardStore>(&self, store: &S) -> Result<(), A::Error> {
        let board = self.api.fetch_board(self.project_id).await?;
        store.replace_board(board.normalized());
        Ok(())
    }

    /// Create a task and place it where the server put it.
    pub async fn create_task<S: BoardStore>(
        &self,
        store: &S,
        column_id: ColumnId,
        title: &str,
    ) -> Result<TaskId, A::Error> {
        let task = self.api.create_task(self.project_id, column_id, title).await?;
        let id = task.id;
        let placed = store.with_board_mut(|board| board.insert_task(column_id, task)).unwrap_or(false);
        if !placed {
            // column gone or task already listed; the server copy wins
            self.refresh(store).await?;
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{board, ids};
    use crate::reorder::hover;
    use crate::session::DragTracker;
    use std::cell::Cell;

    /// In-memory server with dense positions
    struct FakeApi {
        server: RefCell<Board>,
        fail_moves: Cell<bool>,
        fail_fetch: Cell<bool>,
        moves: RefCell<Vec<MoveRequest>>,
        fetches: Cell<usize>,
        next_id: Cell<TaskId>,
    }

    impl FakeApi {
        fn new(server: Board) -> Self {
            Self {
                server: RefCell::new(server),
                fail_moves: Cell::new(false),
                fail_fetch: Cell::new(false),
                moves: RefCell::new(Vec::new()),
                fetches: Cell::new(0),
                next_id: Cell::new(100),
            }
        }
    }

    #[async_trait(?Send)]
    impl BoardApi for FakeApi {
        type Error = String;

        async fn move_task(&self, task_id: TaskId, column_id: ColumnId, index: usize) -> Result<(), String> {
            self.moves.borrow_mut().push(MoveRequest { task_id, column_id, index });
            if self.fail_moves.get() {
                return Err("conflict".to_string());
            }
            let mut server = self.server.borrow_mut();
            let from = server.find_column_containing(task_id).map(|c| c.id).ok_or("no such task")?;
            server.move_task(task_id, from, column_id, index);
            Ok(())
        }

        async fn fetch_board(&self, _project_id: ProjectId) -> Result<Board, String> {
            self.fetches.set(self.fetches.get() + 1);
            if self.fail_fetch.get() {
                return Err("offline".to_string());
            }
            Ok(self.server.borrow().clone())
        }

        async fn create_task(&self, _project_id: ProjectId, column_id: ColumnId, title: &str) -> Result<Task, String> {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let task = Task::new(id, title);
            self.server.borrow_mut().insert_task(column_id, task.clone());
            Ok(task)
        }
    }

    fn start(store: &RefCell<Board>, task: TaskId) -> DragTracker {
        let mut tracker = DragTracker::new();
        tracker.begin(&store.borrow(), task);
        tracker
    }

    #[tokio::test]
    async fn test_cross_column_drop_persists_once() {
        // Scheduled=[T1,T2], Done=[]
        let initial = board(&[(1, "Scheduled", &[1, 2]), (2, "Done", &[])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        let store = RefCell::new(initial);

        let mut tracker = start(&store, 1);
        let session = *tracker.current().unwrap();
        hover(&mut store.borrow_mut(), &session, DropTarget::Column(2));
        assert_eq!(ids(&store.borrow(), 1), vec![2]);
        assert_eq!(ids(&store.borrow(), 2), vec![1]);

        let out = rec.commit_drop(&store, tracker.end(), Some(DropTarget::Column(2))).await;
        let req = MoveRequest { task_id: 1, column_id: 2, index: 0 };
        assert_eq!(out, CommitOutcome::Confirmed(req));
        assert_eq!(*api.moves.borrow(), vec![req]);
        assert_eq!(api.fetches.get(), 0);
        assert_eq!(*store.borrow(), *api.server.borrow());
        assert!(!tracker.is_dragging());
    }

    #[tokio::test]
    async fn test_failed_move_reverts_to_server_board() {
        let initial = board(&[(1, "Scheduled", &[1, 2]), (2, "Done", &[])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        api.fail_moves.set(true);
        let store = RefCell::new(initial.clone());

        let mut tracker = start(&store, 1);
        let session = *tracker.current().unwrap();
        hover(&mut store.borrow_mut(), &session, DropTarget::Column(2));

        let out = rec.commit_drop(&store, tracker.end(), Some(DropTarget::Column(2))).await;
        assert!(matches!(out, CommitOutcome::Reconciled { .. }));
        assert_eq!(api.moves.borrow().len(), 1);
        assert_eq!(*store.borrow(), initial);
    }

    #[tokio::test]
    async fn test_rollback_converges_after_many_hovers() {
        let server = board(&[(1, "A", &[1, 2, 3]), (2, "B", &[4]), (3, "C", &[5, 6])]);
        let rec = Reconciler::new(FakeApi::new(server.clone()), 1);
        let api = &rec.api;
        api.fail_moves.set(true);
        let store = RefCell::new(server.clone());

        let mut tracker = start(&store, 2);
        let session = *tracker.current().unwrap();
        for target in [DropTarget::Column(2), DropTarget::Task(6), DropTarget::Task(4), DropTarget::Column(3)] {
            hover(&mut store.borrow_mut(), &session, target);
        }
        assert_ne!(*store.borrow(), server);

        rec.commit_drop(&store, tracker.end(), Some(DropTarget::Task(5))).await;
        assert_eq!(*store.borrow(), *api.server.borrow());
        assert_eq!(*store.borrow(), server);
    }

    #[tokio::test]
    async fn test_self_drop_is_noop() {
        let initial = board(&[(1, "A", &[1, 2]), (2, "B", &[3])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        let store = RefCell::new(initial.clone());

        let mut tracker = start(&store, 1);
        let session = *tracker.current().unwrap();
        // a live move, then released over itself
        hover(&mut store.borrow_mut(), &session, DropTarget::Task(3));

        let out = rec.commit_drop(&store, tracker.end(), Some(DropTarget::Task(1))).await;
        assert_eq!(out, CommitOutcome::SelfDrop);
        assert!(api.moves.borrow().is_empty());
        assert_eq!(*store.borrow(), initial);
    }

    #[tokio::test]
    async fn test_drop_outside_aborts_and_clears_session() {
        let initial = board(&[(1, "A", &[1, 2]), (2, "B", &[])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        let store = RefCell::new(initial.clone());

        let mut tracker = start(&store, 2);
        let session = *tracker.current().unwrap();
        hover(&mut store.borrow_mut(), &session, DropTarget::Column(2));

        let out = rec.commit_drop(&store, tracker.end(), None).await;
        assert_eq!(out, CommitOutcome::Aborted(AbortReason::NoTarget));
        assert!(api.moves.borrow().is_empty());
        assert!(!tracker.is_dragging());
        assert_eq!(*store.borrow(), initial);
    }

    #[tokio::test]
    async fn test_same_column_reorder_sends_only_moved_index() {
        let initial = board(&[(1, "A", &[1, 2, 3, 4])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        let store = RefCell::new(initial);

        let mut tracker = start(&store, 1);
        let out = rec.commit_drop(&store, tracker.end(), Some(DropTarget::Task(3))).await;

        assert_eq!(out, CommitOutcome::Confirmed(MoveRequest { task_id: 1, column_id: 1, index: 2 }));
        assert_eq!(ids(&store.borrow(), 1), vec![2, 3, 1, 4]);
        assert_eq!(api.moves.borrow().len(), 1);
        assert_eq!(*store.borrow(), *api.server.borrow());
    }

    #[tokio::test]
    async fn test_drop_on_other_column_without_hover() {
        let initial = board(&[(1, "A", &[1, 2]), (2, "B", &[3, 4])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        let store = RefCell::new(initial);

        let mut tracker = start(&store, 2);
        let out = rec.commit_drop(&store, tracker.end(), Some(DropTarget::Task(4))).await;

        assert_eq!(out, CommitOutcome::Confirmed(MoveRequest { task_id: 2, column_id: 2, index: 1 }));
        assert_eq!(ids(&store.borrow(), 2), vec![3, 2, 4]);
    }

    #[tokio::test]
    async fn test_drop_over_card_lands_before_it_with_or_without_hover() {
        let initial = board(&[(1, "A", &[1, 2]), (2, "B", &[3, 4])]);

        let store = RefCell::new(initial.clone());
        let mut tracker = start(&store, 2);
        let session = *tracker.current().unwrap();
        hover(&mut store.borrow_mut(), &session, DropTarget::Task(4));
        assert_eq!(ids(&store.borrow(), 2), vec![3, 2, 4]);
        let hovered = settle_drop(&mut store.borrow_mut(), &tracker.end().unwrap(), Some(DropTarget::Task(4)));

        let direct = RefCell::new(initial);
        let mut tracker = start(&direct, 2);
        let dropped = settle_drop(&mut direct.borrow_mut(), &tracker.end().unwrap(), Some(DropTarget::Task(4)));

        let req = MoveRequest { task_id: 2, column_id: 2, index: 1 };
        assert_eq!(hovered, DropResolution::Persist(req));
        assert_eq!(dropped, DropResolution::Persist(req));
        assert_eq!(ids(&store.borrow(), 2), vec![3, 2, 4]);
        assert_eq!(*store.borrow(), *direct.borrow());
    }

    #[test]
    fn test_drop_after_hover_follows_last_card() {
        // hovered over 3, released over 4: same result as dropping on 4 directly
        let store = RefCell::new(board(&[(1, "A", &[1, 2]), (2, "B", &[3, 4])]));
        let mut tracker = start(&store, 2);
        let session = *tracker.current().unwrap();
        hover(&mut store.borrow_mut(), &session, DropTarget::Task(3));
        assert_eq!(ids(&store.borrow(), 2), vec![2, 3, 4]);

        let out = settle_drop(&mut store.borrow_mut(), &tracker.end().unwrap(), Some(DropTarget::Task(4)));
        assert_eq!(out, DropResolution::Persist(MoveRequest { task_id: 2, column_id: 2, index: 1 }));
        assert_eq!(ids(&store.borrow(), 2), vec![3, 2, 4]);
        assert_eq!(ids(&store.borrow(), 1), vec![1]);
    }

    /// A view that has been torn down
    struct GoneStore;

    impl BoardStore for GoneStore {
        fn with_board_mut<R>(&self, _f: impl FnOnce(&mut Board) -> R) -> Option<R> {
            None
        }
    }

    #[tokio::test]
    async fn test_refresh_into_gone_board_is_harmless() {
        let rec = Reconciler::new(FakeApi::new(board(&[(1, "A", &[1])])), 1);
        assert_eq!(rec.refresh(&GoneStore).await, Ok(()));
        assert_eq!(rec.api.fetches.get(), 1);

        let out = rec.commit_drop(&GoneStore, None, None).await;
        assert_eq!(out, CommitOutcome::Idle);
    }

    #[tokio::test]
    async fn test_refetch_failure_is_unresolved() {
        let initial = board(&[(1, "A", &[1]), (2, "B", &[])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        api.fail_moves.set(true);
        api.fail_fetch.set(true);
        let store = RefCell::new(initial);

        let mut tracker = start(&store, 1);
        let out = rec.commit_drop(&store, tracker.end(), Some(DropTarget::Column(2))).await;
        assert!(matches!(out, CommitOutcome::Unresolved { .. }));
        assert_eq!(api.fetches.get(), 1);
    }

    #[tokio::test]
    async fn test_commit_without_session_is_idle() {
        let initial = board(&[(1, "A", &[1])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        let store = RefCell::new(initial);

        let out = rec.commit_drop(&store, None, Some(DropTarget::Column(1))).await;
        assert_eq!(out, CommitOutcome::Idle);
        assert!(api.moves.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_create_task_inserts_at_server_position() {
        let initial = board(&[(1, "A", &[1, 2])]);
        let rec = Reconciler::new(FakeApi::new(initial.clone()), 1);
        let api = &rec.api;
        let store = RefCell::new(initial);

        let id = rec.create_task(&store, 1, "Write docs").await.unwrap();
        assert_eq!(ids(&store.borrow(), 1), vec![id, 1, 2]);
        assert_eq!(store.borrow().task(id).unwrap().title, "Write docs");
    }
}
