//! Settings Page
//!
//! Notification toggles and appearance theme. Changes apply immediately and
//! revert when the server refuses them.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{UserSettings, THEME_OPTIONS};
use crate::store::{store_set_settings, use_app_store, AppStateStoreFields};

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (error, set_error) = signal(None::<String>);

    let apply = move |change: Box<dyn FnOnce(&mut UserSettings)>| {
        let Some(previous) = store.settings().get_untracked() else {
            return;
        };
        let mut next = previous.clone();
        change(&mut next);
        store_set_settings(&store, next.clone());
        set_error.set(None);
        let api = ctx.api();
        spawn_local(async move {
            if let Err(e) = api.update_settings(&next).await {
                log::warn!("[API] settings update failed, reverting");
                store_set_settings(&store, previous);
                let _ = set_error.try_set(Some(ctx.error_text(&e)));
            }
        });
    };

    let toggle = move |label: &'static str, get: fn(&UserSettings) -> bool, set: fn(&mut UserSettings, bool)| {
        let checked = move || store.settings().with(|s| s.as_ref().map(get).unwrap_or(false));
        view! {
            <label class="settings-toggle">
                <input
                    type="checkbox"
                    prop:checked=checked
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        apply(Box::new(move |s: &mut UserSettings| set(s, on)));
                    }
                />
                {label}
            </label>
        }
    };

    let theme = move || store.settings().with(|s| s.as_ref().map(|s| s.appearance_theme.clone()).unwrap_or_default());

    view! {
        <div class="settings-page">
            <h1>"Settings"</h1>
            <Show when=move || store.settings().with(|s| s.is_some()) fallback=|| view! { <p class="page-loading">"Loading settings..."</p> }>
                <section class="settings-section">
                    <h2>"Notifications"</h2>
                    {toggle("When I'm assigned a task", |s| s.notifications_assign, |s, v| s.notifications_assign = v)}
                    {toggle("When a due date is near", |s| s.notifications_due_date, |s, v| s.notifications_due_date = v)}
                    {toggle("When someone comments", |s| s.notifications_comments, |s, v| s.notifications_comments = v)}
                </section>
                <section class="settings-section">
                    <h2>"Appearance"</h2>
                    <select
                        prop:value=theme
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            apply(Box::new(move |s: &mut UserSettings| s.appearance_theme = value));
                        }
                    >
                        {THEME_OPTIONS.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                    </select>
                    <p class="muted">"Automatic follows the time of day."</p>
                </section>
            </Show>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
        </div>
    }
}
