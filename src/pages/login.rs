//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (e, p) = (email.get(), password.get());
        if e.trim().is_empty() || p.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        let api = ctx.api();
        spawn_local(async move {
            match api.login(&e, &p).await {
                Ok(token) => ctx.signed_in(token),
                Err(err) => {
                    log::warn!("[API] login failed: {}", err);
                    let _ = set_error.try_set(Some(err.to_string()));
                    let _ = set_busy.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card form" on:submit=on_submit>
                <h1>"Planify"</h1>
                <label>"Email"
                    <input type="email" autocomplete="username" prop:value=move || email.get() on:input=move |ev| set_email.set(event_target_value(&ev)) />
                </label>
                <label>"Password"
                    <input type="password" autocomplete="current-password" prop:value=move || password.get() on:input=move |ev| set_password.set(event_target_value(&ev)) />
                </label>
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
