//! Pages
//!
//! One component per hash route.

mod home;
mod login;
mod my_tasks;
mod profile;
mod project;
mod settings;
mod task;

use leptos::prelude::*;

use crate::router::Route;

pub use home::HomePage;
pub use login::LoginPage;
pub use my_tasks::MyTasksPage;
pub use profile::ProfilePage;
pub use project::ProjectPage;
pub use settings::SettingsPage;
pub use task::TaskPage;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page-empty">
            <h1>"Page not found"</h1>
            <a href=Route::Home.href()>"Back to projects"</a>
        </div>
    }
}

/// Load state shared by the data pages
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}
