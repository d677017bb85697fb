//! Board Column Component
//!
//! One status column: header with count, cards, empty placeholder and the
//! add-task input.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;
use planify_board::{ColumnId, ProjectId, Reconciler, Task};

use crate::components::board_view::BoardSignal;
use crate::components::TaskCard;
use crate::context::use_app_context;

#[component]
pub fn BoardColumn(
    project_id: ProjectId,
    column_id: ColumnId,
    title: String,
    board: BoardSignal,
    dnd: DndSignals,
) -> impl IntoView {
    let ctx = use_app_context();
    let (new_title, set_new_title) = signal(String::new());
    let (adding, set_adding) = signal(false);

    let tasks = move || board.0.with(|b| b.column(column_id).map(|c| c.tasks.clone()).unwrap_or_default());
    let count = move || board.0.with(|b| b.column(column_id).map(|c| c.tasks.len()).unwrap_or(0));

    let is_drop_target = move || match dnd.drop_target_read.get() {
        Some(DropTarget::Column(id)) => id == column_id,
        Some(DropTarget::Task(id)) => board.0.with(|b| b.find_column_containing(id).map(|c| c.id) == Some(column_id)),
        None => false,
    };

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_title.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        set_adding.set(true);
        let api = ctx.api();
        spawn_local(async move {
            let reconciler = Reconciler::new(api, project_id);
            match reconciler.create_task(&board, column_id, &text).await {
                Ok(id) => {
                    log::info!("[BOARD] created task {} in column {}", id, column_id);
                    let _ = set_new_title.try_set(String::new());
                }
                Err(e) => log::warn!("[BOARD] create task failed: {}", ctx.error_text(&e)),
            }
            let _ = set_adding.try_set(false);
        });
    };

    view! {
        <section
            class=move || if is_drop_target() { "board-column drop-target" } else { "board-column" }
            on:mouseenter=make_on_column_mouseenter(dnd, column_id)
            on:mouseleave=make_on_column_mouseleave(dnd)
        >
            <header class="board-column-header">
                <h3>{title}</h3>
                <span class="board-column-count">{count}</span>
            </header>
            <div class="board-column-body">
                <For
                    each=tasks
                    key=card_key
                    children=move |task: Task| view! { <TaskCard task=task column_id=column_id dnd=dnd /> }
                />
                <Show when=move || count() == 0>
                    <div class="board-column-empty">"No tasks"</div>
                </Show>
            </div>
            <form class="board-add-task" on:submit=add_task>
                <input
                    type="text"
                    placeholder="Add a task..."
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    disabled=move || adding.get()
                />
            </form>
        </section>
    }
}

/// Every field a card shows, so edits re-render it
fn card_key(task: &Task) -> (u32, String, Option<String>, Option<&'static str>, u32, u32, Vec<u32>) {
    (
        task.id,
        task.title.clone(),
        task.due_date.clone(),
        task.priority.map(|p| p.as_str()),
        task.comments_count,
        task.attachments_count,
        task.assignees.iter().map(|a| a.id).collect(),
    )
}
