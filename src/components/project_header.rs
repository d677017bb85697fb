//! Project Header Component
//!
//! Name, description, team and due date for the board page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{AddPersonDialog, Avatar, DueDatePicker};
use crate::context::use_app_context;
use crate::models::User;

#[component]
pub fn ProjectHeader(
    project_id: u32,
    name: String,
    description: Option<String>,
    due_date: RwSignal<Option<String>>,
    team: RwSignal<Vec<User>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (adding, set_adding) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let change_due_date = move |next: Option<String>| {
        let previous = due_date.get_untracked();
        due_date.set(next.clone());
        let api = ctx.api();
        spawn_local(async move {
            if let Err(e) = api.update_project_due_date(project_id, next.as_deref()).await {
                log::warn!("[APP] due date update failed: {}", ctx.error_text(&e));
                let _ = due_date.try_set(previous);
            }
        });
    };

    let add_member = move |user: User| {
        set_error.set(None);
        let api = ctx.api();
        spawn_local(async move {
            match api.add_project_member(project_id, user.id).await {
                Ok(()) => {
                    log::info!("[APP] added {} to project {}", user.id, project_id);
                    let _ = team.try_update(|t| t.push(user));
                    let _ = set_adding.try_set(false);
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(ctx.error_text(&e)));
                }
            }
        });
    };

    let team_ids = Signal::derive(move || team.get().iter().map(|u| u.id).collect::<Vec<_>>());

    view! {
        <div class="project-header">
            <div class="project-header-main">
                <h1>{name}</h1>
                {description.filter(|d| !d.is_empty()).map(|d| view! { <p class="project-description">{d}</p> })}
            </div>
            <div class="project-header-meta">
                <div class="project-team">
                    <For
                        each=move || team.get()
                        key=|u| u.id
                        children=move |u| view! { <Avatar name=u.name url=u.avatar small=true /> }
                    />
                    <button class="project-add-member" title="Add member" on:click=move |_| set_adding.set(true)>"+"</button>
                </div>
                <label class="project-due">
                    "Due "
                    <DueDatePicker value=due_date on_change=change_due_date />
                </label>
            </div>
        </div>
        <Show when=move || adding.get()>
            <AddPersonDialog
                title="Add project member"
                exclude=team_ids
                on_pick=add_member
                on_close=Callback::new(move |_: ()| {
                    set_adding.set(false);
                    set_error.set(None);
                })
                error=error
            />
        </Show>
    }
}
