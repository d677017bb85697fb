//! Home Page
//!
//! Project cards and the create-project entry point.

use leptos::prelude::*;

use crate::components::CreateProjectModal;
use crate::router::Route;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn HomePage() -> impl IntoView {
    let store = use_app_store();
    let (creating, set_creating) = signal(false);

    let greeting = move || match store.me().get() {
        Some(me) => format!("Welcome back, {}", me.name),
        None => "Welcome back".to_string(),
    };

    view! {
        <div class="home-page">
            <div class="page-header">
                <h1>{greeting}</h1>
                <button class="primary" on:click=move |_| set_creating.set(true)>"New project"</button>
            </div>
            <div class="project-grid">
                <For
                    each=move || store.projects().get()
                    key=|p| (p.id, p.name.clone(), p.description.clone())
                    children=move |p| view! {
                        <a class="project-card" href=Route::Project(p.id).href()>
                            <h3>{p.name}</h3>
                            <p>{p.description.unwrap_or_default()}</p>
                        </a>
                    }
                />
            </div>
            <Show when=move || store.projects().with(|p| p.is_empty())>
                <p class="page-empty">"No projects yet. Create one to get started."</p>
            </Show>
        </div>
        <Show when=move || creating.get()>
            <CreateProjectModal on_close=Callback::new(move |_: ()| set_creating.set(false)) />
        </Show>
    }
}
