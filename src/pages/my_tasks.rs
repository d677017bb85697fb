//! My Tasks Page
//!
//! Everything assigned to the signed-in user, grouped by project with open
//! tasks ahead of finished ones.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::dates;
use crate::models::UserTask;
use crate::pages::Loadable;
use crate::router::Route;

/// Tasks of one project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup {
    pub project_id: u32,
    pub project_name: String,
    pub tasks: Vec<UserTask>,
}

/// Groups keep first-seen project order; within a group open tasks come
/// first, each part keeping server order.
pub fn group_by_project(tasks: Vec<UserTask>) -> Vec<ProjectGroup> {
    let mut groups: Vec<ProjectGroup> = Vec::new();
    for task in tasks {
        match groups.iter_mut().find(|g| g.project_id == task.project_id) {
            Some(group) => group.tasks.push(task),
            None => groups.push(ProjectGroup {
                project_id: task.project_id,
                project_name: task.project_name.clone(),
                tasks: vec![task],
            }),
        }
    }
    for group in &mut groups {
        // stable sort: false (open) before true (done)
        group.tasks.sort_by_key(UserTask::is_done);
    }
    groups
}

#[component]
pub fn MyTasksPage() -> impl IntoView {
    let ctx = use_app_context();
    let (state, set_state) = signal(Loadable::<Vec<ProjectGroup>>::Loading);

    let api = ctx.api();
    spawn_local(async move {
        let next = match api.my_tasks().await {
            Ok(tasks) => Loadable::Ready(group_by_project(tasks)),
            Err(e) => Loadable::Failed(ctx.error_text(&e)),
        };
        let _ = set_state.try_set(next);
    });

    view! {
        <div class="my-tasks-page">
            <h1>"My Tasks"</h1>
            {move || match state.get() {
                Loadable::Loading => view! { <p class="page-loading">"Loading tasks..."</p> }.into_any(),
                Loadable::Failed(e) => view! { <p class="page-error">{e}</p> }.into_any(),
                Loadable::Ready(groups) if groups.is_empty() => {
                    view! { <p class="page-empty">"Nothing assigned to you."</p> }.into_any()
                }
                Loadable::Ready(groups) => groups.into_iter().map(|g| view! {
                    <section class="task-group">
                        <h2><a href=Route::Project(g.project_id).href()>{g.project_name}</a></h2>
                        <ul>{g.tasks.into_iter().map(task_row).collect_view()}</ul>
                    </section>
                }).collect_view().into_any(),
            }}
        </div>
    }
}

fn task_row(task: UserTask) -> impl IntoView {
    let today = dates::today();
    let done = task.is_done();
    let due = task.due_date.as_deref().and_then(|d| dates::short_label(d, today));
    let overdue = !done && task.due_date.as_deref().map(|d| dates::is_overdue(d, today)).unwrap_or(false);

    view! {
        <li class=if done { "my-task done" } else { "my-task" }>
            <a href=Route::Task(task.id).href()>{task.title}</a>
            <span class="status-chip">{task.status_name}</span>
            {task.priority.map(|p| view! { <span class=format!("priority-pill priority-{}", p.as_str().to_lowercase())>{p.as_str()}</span> })}
            {due.map(|d| view! { <span class=if overdue { "task-due overdue" } else { "task-due" }>{d}</span> })}
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u32, project_id: u32, status: &str) -> UserTask {
        UserTask {
            id,
            title: format!("Task {}", id),
            project_id,
            project_name: format!("Project {}", project_id),
            status_name: status.to_string(),
            due_date: None,
            priority: None,
            comments_count: 0,
            attachments_count: 0,
        }
    }

    #[test]
    fn test_group_by_project_orders_open_first() {
        let groups = group_by_project(vec![
            task(1, 7, "Done"),
            task(2, 3, "Scheduled"),
            task(3, 7, "In Progress"),
            task(4, 7, "Scheduled"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].project_id, 7);
        let ids: Vec<u32> = groups[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4, 1]);
        assert_eq!(groups[1].project_name, "Project 3");
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_project(Vec::new()).is_empty());
    }
}
