//! Project Page
//!
//! Header plus the kanban board.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{BoardView, ProjectHeader};
use crate::context::use_app_context;
use crate::models::{Board, User};
use crate::pages::Loadable;

/// Header fields that never change on this page
#[derive(Debug, Clone, PartialEq)]
struct HeaderInfo {
    name: String,
    description: Option<String>,
}

#[component]
pub fn ProjectPage(project_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let (state, set_state) = signal(Loadable::<HeaderInfo>::Loading);
    let board = RwSignal::new(Board::default());
    let due_date = RwSignal::new(None::<String>);
    let team = RwSignal::new(Vec::<User>::new());

    let api = ctx.api();
    spawn_local(async move {
        match api.get_project(project_id).await {
            Ok(detail) => {
                log::info!(
                    "[BOARD] project {} loaded: {} columns, {} tasks",
                    project_id,
                    detail.board.columns.len(),
                    detail.board.task_count()
                );
                let _ = team.try_set(detail.team().to_vec());
                let _ = due_date.try_set(detail.due_date.clone());
                let _ = board.try_set(detail.board.normalized());
                let _ = set_state.try_set(Loadable::Ready(HeaderInfo { name: detail.name, description: detail.description }));
            }
            Err(e) => {
                let _ = set_state.try_set(Loadable::Failed(ctx.error_text(&e)));
            }
        }
    });

    view! {
        <div class="project-page">
            {move || match state.get() {
                Loadable::Loading => view! { <p class="page-loading">"Loading project..."</p> }.into_any(),
                Loadable::Failed(e) => view! { <p class="page-error">{e}</p> }.into_any(),
                Loadable::Ready(info) => view! {
                    <ProjectHeader
                        project_id=project_id
                        name=info.name
                        description=info.description
                        due_date=due_date
                        team=team
                    />
                    <BoardView project_id=project_id board=board />
                }.into_any(),
            }}
        </div>
    }
}
