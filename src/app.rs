//! Planify Frontend App
//!
//! Auth gate, layout shell and hash routing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{Navbar, Sidebar};
use crate::config::{local_hour, AppConfig, Theme};
use crate::context::AppContext;
use crate::pages::{HomePage, LoginPage, MyTasksPage, NotFoundPage, ProfilePage, ProjectPage, SettingsPage, TaskPage};
use crate::router::{use_hash_route, Route};
use crate::store::{store_clear_session, store_set_settings, AppState, AppStateStoreFields, AppStore};

/// How often the time-of-day theme is re-evaluated
const THEME_TICK_MS: u32 = 60_000;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(AppConfig::from_env());
    let store: AppStore = reactive_stores::Store::new(AppState::new());
    provide_context(ctx);
    provide_context(store);

    let route = use_hash_route();

    // Load shared data when signed in or asked to reload
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if ctx.token.get().is_none() {
            store_clear_session(&store);
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            match api.list_projects().await {
                Ok(projects) => {
                    log::info!("[APP] loaded {} projects", projects.len());
                    store.projects().set(projects);
                }
                Err(e) => log::warn!("[APP] projects failed: {}", ctx.error_text(&e)),
            }
            match api.get_me().await {
                Ok(me) => store.me().set(Some(me)),
                Err(e) => log::warn!("[APP] profile failed: {}", ctx.error_text(&e)),
            }
            match api.get_settings().await {
                Ok(settings) => store_set_settings(&store, settings),
                Err(e) => log::warn!("[APP] settings failed: {}", ctx.error_text(&e)),
            }
        });
    });

    // Time-of-day theme on <html>
    let (hour, set_hour) = signal(local_hour());
    let tick = gloo_timers::callback::Interval::new(THEME_TICK_MS, move || {
        let _ = set_hour.try_set(local_hour());
    });
    let tick = StoredValue::new_local(Some(tick));
    on_cleanup(move || tick.update_value(|t| drop(t.take())));

    Effect::new(move |_| {
        let theme = Theme::for_preference(&store.theme_preference().get(), hour.get());
        if let Some(root) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            root.set_class_name(theme.css_class());
        }
    });

    let signed_in = move || ctx.token.get().is_some() && route.get() != Route::Login;

    view! {
        <Show when=signed_in fallback=|| view! { <LoginPage /> }>
            <div class="app-layout">
                <Sidebar route=route />
                <div class="app-main">
                    <Navbar />
                    <main class="page">
                        {move || match route.get() {
                            Route::Home | Route::Login => view! { <HomePage /> }.into_any(),
                            Route::Project(id) => view! { <ProjectPage project_id=id /> }.into_any(),
                            Route::Task(id) => view! { <TaskPage task_id=id /> }.into_any(),
                            Route::MyTasks => view! { <MyTasksPage /> }.into_any(),
                            Route::Profile => view! { <ProfilePage /> }.into_any(),
                            Route::Settings => view! { <SettingsPage /> }.into_any(),
                            Route::NotFound => view! { <NotFoundPage /> }.into_any(),
                        }}
                    </main>
                </div>
            </div>
        </Show>
    }
}
