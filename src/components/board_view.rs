//! Board View Component
//!
//! Renders a project's columns and wires mouse gestures into the board
//! engine: live cross-column moves while hovering, one commit per drop.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;
use planify_board::{hover, settle_drop, Board, BoardStore, CommitOutcome, DragTracker, HoverOutcome, ProjectId, Reconciler};

use crate::components::BoardColumn;
use crate::context::use_app_context;

/// Board state owned by the view
#[derive(Clone, Copy)]
pub struct BoardSignal(pub RwSignal<Board>);

impl BoardStore for BoardSignal {
    fn with_board_mut<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        // None once the view is gone
        self.0.try_update(f)
    }
}

#[component]
pub fn BoardView(project_id: ProjectId, board: RwSignal<Board>) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = create_dnd_signals();
    let tracker = StoredValue::new(DragTracker::new());
    let store = BoardSignal(board);
    let (notice, set_notice) = signal(None::<String>);

    let on_start = move |task_id: u32| {
        let started = tracker
            .try_update_value(|t| board.with_untracked(|b| t.begin(b, task_id).is_some()))
            .unwrap_or(false);
        if !started {
            log::warn!("[DND] task {} is not on the board", task_id);
        }
    };

    let on_drop = move |task_id: u32, target: Option<DropTarget>| {
        let session = tracker.try_update_value(|t| t.end()).flatten();
        log::debug!("[DND] drop task={} target={:?}", task_id, target);
        let api = ctx.api();
        spawn_local(async move {
            let reconciler = Reconciler::new(api, project_id);
            match reconciler.commit_drop(&store, session, target).await {
                CommitOutcome::Reconciled { reason, .. } => {
                    let _ = set_notice.try_set(Some(format!("Move failed: {}. Board reloaded.", reason)));
                }
                CommitOutcome::Unresolved { reason, .. } => {
                    let _ = set_notice.try_set(Some(format!("Move failed: {}", reason)));
                }
                CommitOutcome::Confirmed(_) => {
                    let _ = set_notice.try_set(None);
                }
                _ => {}
            }
        });
    };

    let on_cancel = move |task_id: u32| {
        log::debug!("[DND] cancelled drag of task {}", task_id);
        if let Some(session) = tracker.try_update_value(|t| t.end()).flatten() {
            store.with_board_mut(|b| settle_drop(b, &session, None));
        }
    };

    bind_global_handlers(dnd, on_start, on_drop, on_cancel);

    // Pointer-over drives live cross-column moves
    Effect::new(move |_| {
        let Some(target) = dnd.drop_target_read.get() else {
            return;
        };
        let Some(session) = tracker.try_with_value(|t| t.current().copied()).flatten() else {
            return;
        };
        board.maybe_update(|b| matches!(hover(b, &session, target), HoverOutcome::Moved { .. }));
    });

    let board_class = move || {
        if dnd.dragging_id_read.get().is_some() { "board dragging" } else { "board" }
    };

    view! {
        {move || notice.get().map(|text| view! {
            <div class="board-notice" on:click=move |_| set_notice.set(None)>{text}</div>
        })}
        <div class=board_class>
            <For
                each=move || board.with(|b| b.columns.iter().map(|c| (c.id, c.title.clone())).collect::<Vec<_>>())
                key=|(id, title)| (*id, title.clone())
                children=move |(column_id, title)| {
                    view! {
                        <BoardColumn
                            project_id=project_id
                            column_id=column_id
                            title=title
                            board=store
                            dnd=dnd
                        />
                    }
                }
            />
        </div>
    }
}
