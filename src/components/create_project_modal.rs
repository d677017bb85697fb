//! Create Project Modal
//!
//! Name, description, due date and initial team.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::NewProject;
use crate::components::{Avatar, MemberSearch, Modal};
use crate::context::use_app_context;
use crate::models::User;
use crate::router::{navigate, Route};
use crate::store::{store_upsert_project, use_app_store};

#[component]
pub fn CreateProjectModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());
    let (team, set_team) = signal(Vec::<User>::new());
    let (error, set_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let team_ids = Signal::derive(move || team.get().iter().map(|u| u.id).collect::<Vec<_>>());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let project = NewProject {
            name: name.get().trim().to_string(),
            description: description.get().trim().to_string(),
            due_date: Some(due_date.get()).filter(|d| !d.is_empty()),
            team_ids: team_ids.get(),
        };
        if project.name.is_empty() {
            set_error.set(Some("Project name is required".to_string()));
            return;
        }
        set_saving.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.create_project(&project).await {
                Ok(created) => {
                    log::info!("[APP] created project {}", created.id);
                    let id = created.id;
                    store_upsert_project(&store, created);
                    on_close.run(());
                    navigate(Route::Project(id));
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(ctx.error_text(&e)));
                    let _ = set_saving.try_set(false);
                }
            }
        });
    };

    view! {
        <Modal title="New project" on_close=on_close>
            <form class="form" on:submit=on_submit>
                <label>"Name"
                    <input type="text" prop:value=move || name.get() on:input=move |ev| set_name.set(event_target_value(&ev)) />
                </label>
                <label>"Description"
                    <textarea prop:value=move || description.get() on:input=move |ev| set_description.set(event_target_value(&ev))></textarea>
                </label>
                <label>"Due date"
                    <input type="date" prop:value=move || due_date.get() on:input=move |ev| set_due_date.set(event_target_value(&ev)) />
                </label>
                <div class="form-field">
                    <span>"Team"</span>
                    <div class="team-chips">
                        <For
                            each=move || team.get()
                            key=|u| u.id
                            children=move |user| {
                                let id = user.id;
                                view! {
                                    <span class="chip">
                                        <Avatar name=user.name.clone() url=user.avatar.clone() small=true />
                                        {user.name}
                                        <button type="button" on:click=move |_| set_team.update(|t| t.retain(|u| u.id != id))>"×"</button>
                                    </span>
                                }
                            }
                        />
                    </div>
                    <MemberSearch exclude=team_ids on_pick={move |user: User| set_team.update(|t| t.push(user))} />
                </div>
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <div class="form-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary" disabled=move || saving.get()>"Create"</button>
                </div>
            </form>
        </Modal>
    }
}
