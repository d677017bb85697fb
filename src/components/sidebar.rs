//! Sidebar Component
//!
//! Navigation links and the project list.

use leptos::prelude::*;

use crate::components::CreateProjectModal;
use crate::router::Route;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Sidebar(route: ReadSignal<Route>) -> impl IntoView {
    let store = use_app_store();
    let (creating, set_creating) = signal(false);

    let link = move |target: Route, label: &'static str| {
        let class = move || if route.get() == target { "sidebar-link active" } else { "sidebar-link" };
        view! { <a class=class href=target.href()>{label}</a> }
    };

    view! {
        <nav class="sidebar">
            {link(Route::Home, "Home")}
            {link(Route::MyTasks, "My Tasks")}
            {link(Route::Settings, "Settings")}

            <div class="sidebar-section">
                <span>"Projects"</span>
                <button class="sidebar-add" title="New project" on:click=move |_| set_creating.set(true)>"+"</button>
            </div>
            <For
                each=move || store.projects().get()
                key=|p| (p.id, p.name.clone())
                children=move |project| link_for_project(route, project.id, project.name)
            />
            <Show when=move || store.projects().with(|p| p.is_empty())>
                <div class="sidebar-empty">"No projects yet"</div>
            </Show>
        </nav>
        <Show when=move || creating.get()>
            <CreateProjectModal on_close=Callback::new(move |_: ()| set_creating.set(false)) />
        </Show>
    }
}

fn link_for_project(route: ReadSignal<Route>, id: u32, name: String) -> impl IntoView {
    let target = Route::Project(id);
    let class = move || if route.get() == target { "sidebar-project active" } else { "sidebar-project" };
    view! { <a class=class href=target.href()>{name}</a> }
}
