//! Task Card Component

use leptos::prelude::*;

use leptos_dragdrop::*;
use planify_board::{ColumnId, Task};

use crate::components::Avatar;
use crate::dates;
use crate::markdown::excerpt;
use crate::router::{navigate, Route};

const EXCERPT_CHARS: usize = 90;

#[component]
pub fn TaskCard(task: Task, column_id: ColumnId, dnd: DndSignals) -> impl IntoView {
    let id = task.id;

    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let is_drop_target = move || dnd.drop_target_read.get() == Some(DropTarget::Task(id));
    let card_class = move || {
        let mut c = String::from("task-card");
        if is_dragging() { c.push_str(" dragging"); }
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    let open = move |_| {
        // the click that ends a drag is not an open
        if !dnd.drag_just_ended_read.get_untracked() {
            navigate(Route::Task(id));
        }
    };

    let today = dates::today();
    let due = task.due_date.as_deref().and_then(|d| {
        let label = dates::short_label(d, today)?;
        let class = if dates::is_overdue(d, today) { "task-due overdue" } else { "task-due" };
        Some(view! { <span class=class>{label}</span> })
    });
    let priority = task.priority.map(|p| {
        view! { <span class=format!("priority-pill priority-{}", p.as_str().to_lowercase())>{p.as_str()}</span> }
    });
    let preview = task.description.as_deref().map(|d| excerpt(d, EXCERPT_CHARS)).filter(|d| !d.is_empty());

    view! {
        <article
            class=card_class
            on:mousedown=make_on_mousedown(dnd, id)
            on:mouseenter=make_on_task_mouseenter(dnd, id)
            on:mouseleave=make_on_task_mouseleave(dnd, column_id)
            on:click=open
        >
            <div class="task-card-top">
                {priority}
                {due}
            </div>
            <h4 class="task-title">{task.title.clone()}</h4>
            {preview.map(|p| view! { <p class="task-preview">{p}</p> })}
            <div class="task-card-footer">
                <span class="task-counts">
                    {(task.comments_count > 0).then(|| view! { <span title="Comments">"💬 " {task.comments_count}</span> })}
                    {(task.attachments_count > 0).then(|| view! { <span title="Attachments">"📎 " {task.attachments_count}</span> })}
                </span>
                <span class="task-assignees">
                    {task.assignees.into_iter().map(|a| view! {
                        <Avatar name=a.name url=a.avatar small=true />
                    }).collect_view()}
                </span>
            </div>
        </article>
    }
}
