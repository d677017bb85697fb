//! Profile Page
//!
//! The signed-in user's details, activity counters, avatar and password.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::components::Avatar;
use crate::context::use_app_context;
use crate::dates;
use crate::models::{Summary, User};
use crate::store::{use_app_store, AppStateStoreFields};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Problem with a new password, if any
pub fn password_problem(password: &str, confirmation: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else if password != confirmation {
        Some("Passwords do not match")
    } else {
        None
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (summary, set_summary) = signal(None::<Summary>);

    let api = ctx.api();
    spawn_local(async move {
        match api.my_summary().await {
            Ok(s) => {
                let _ = set_summary.try_set(Some(s));
            }
            // older servers have no summary endpoint
            Err(e) => log::debug!("[API] summary unavailable: {}", e),
        }
    });

    view! {
        <div class="profile-page">
            {move || store.me().get().map(|me| view! {
                <ProfileCard me=me />
            })}
            {move || summary.get().map(|s| view! { <SummaryPanel summary=s /> })}
            <PasswordForm />
        </div>
    }
}

#[component]
fn ProfileCard(me: User) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (name, set_name) = signal(me.name.clone());
    let (email, set_email) = signal(me.email.clone());
    let (message, set_message) = signal(None::<String>);
    let (uploading, set_uploading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (n, e) = (name.get(), email.get());
        if n.trim().is_empty() || e.trim().is_empty() {
            set_message.set(Some("Name and email are required".to_string()));
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            match api.update_me(&n, &e).await {
                Ok(updated) => {
                    store.me().set(Some(updated));
                    let _ = set_message.try_set(Some("Profile saved".to_string()));
                }
                Err(err) => {
                    let _ = set_message.try_set(Some(ctx.error_text(&err)));
                }
            }
        });
    };

    let on_avatar = move |ev: web_sys::Event| {
        let Some(file) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        set_uploading.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.upload_avatar(&file).await {
                Ok(url) => {
                    store.me().update(|me| {
                        if let Some(me) = me {
                            me.avatar = Some(url);
                        }
                    });
                }
                Err(err) => {
                    let _ = set_message.try_set(Some(ctx.error_text(&err)));
                }
            }
            let _ = set_uploading.try_set(false);
        });
    };

    let avatar = move || store.me().with(|m| m.as_ref().and_then(|m| m.avatar.clone()));

    view! {
        <section class="profile-card">
            <div class="profile-avatar">
                {move || view! { <Avatar name=name.get() url=avatar() /> }}
                <label class="upload-button">
                    {move || if uploading.get() { "Uploading..." } else { "Change picture" }}
                    <input type="file" accept="image/*" hidden=true on:change=on_avatar />
                </label>
            </div>
            <form class="form" on:submit=on_submit>
                <label>"Name"
                    <input type="text" prop:value=move || name.get() on:input=move |ev| set_name.set(event_target_value(&ev)) />
                </label>
                <label>"Email"
                    <input type="email" prop:value=move || email.get() on:input=move |ev| set_email.set(event_target_value(&ev)) />
                </label>
                {move || message.get().map(|m| view! { <p class="form-message">{m}</p> })}
                <button type="submit" class="primary">"Save"</button>
            </form>
        </section>
    }
}

#[component]
fn SummaryPanel(summary: Summary) -> impl IntoView {
    let now = chrono::Utc::now();
    let counters = [
        ("Assigned", summary.assigned_count),
        ("Collaborating", summary.collaborator_count),
        ("Comments", summary.comment_count),
        ("Projects", summary.project_count),
    ];
    let activity = summary.recent_activity.unwrap_or_default();

    view! {
        <section class="summary-panel">
            <div class="summary-counters">
                {counters.into_iter().map(|(label, n)| view! {
                    <div class="summary-counter"><strong>{n}</strong><span>{label}</span></div>
                }).collect_view()}
            </div>
            {(!activity.is_empty()).then(|| view! { <h3>"Recent activity"</h3> })}
            <ul class="activity-list">
                {activity.into_iter().map(|a| view! {
                    <li>
                        <span>{a.text}</span>
                        {a.task_title.map(|t| view! { <em>" · " {t}</em> })}
                        <span class="muted">" " {dates::relative_time(&a.created_at, now)}</span>
                    </li>
                }).collect_view()}
            </ul>
        </section>
    }
}

#[component]
fn PasswordForm() -> impl IntoView {
    let ctx = use_app_context();
    let (password, set_password) = signal(String::new());
    let (confirmation, set_confirmation) = signal(String::new());
    let (message, set_message) = signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (p, c) = (password.get(), confirmation.get());
        if let Some(problem) = password_problem(&p, &c) {
            set_message.set(Some(problem.to_string()));
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let text = match api.change_password(&p).await {
                Ok(()) => {
                    let _ = set_password.try_set(String::new());
                    let _ = set_confirmation.try_set(String::new());
                    "Password changed".to_string()
                }
                Err(e) => ctx.error_text(&e),
            };
            let _ = set_message.try_set(Some(text));
        });
    };

    view! {
        <section class="password-form">
            <h2>"Change password"</h2>
            <form class="form" on:submit=on_submit>
                <label>"New password"
                    <input type="password" autocomplete="new-password" prop:value=move || password.get() on:input=move |ev| set_password.set(event_target_value(&ev)) />
                </label>
                <label>"Confirm password"
                    <input type="password" autocomplete="new-password" prop:value=move || confirmation.get() on:input=move |ev| set_confirmation.set(event_target_value(&ev)) />
                </label>
                {move || message.get().map(|m| view! { <p class="form-message">{m}</p> })}
                <button type="submit" class="primary">"Update password"</button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert_eq!(password_problem("abc", "abc"), Some("Password must be at least 6 characters"));
        assert_eq!(password_problem("abcdef", "abcdeg"), Some("Passwords do not match"));
        assert_eq!(password_problem("abcdef", "abcdef"), None);
    }
}
