//! Member Search Component
//!
//! Debounced user search with keyboard selection of results.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::Avatar;
use crate::context::use_app_context;
use crate::models::User;

const DEBOUNCE_MS: u32 = 250;
const MAX_RESULTS: usize = 6;

/// Drop users already picked, keep the first few
pub fn visible_results(results: Vec<User>, exclude: &[u32]) -> Vec<User> {
    results.into_iter().filter(|u| !exclude.contains(&u.id)).take(MAX_RESULTS).collect()
}

#[component]
pub fn MemberSearch(
    /// User IDs already on the team / task
    #[prop(into)]
    exclude: Signal<Vec<u32>>,
    #[prop(into)] on_pick: Callback<User>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<User>::new());
    let (selected_idx, set_selected_idx) = signal(0usize);
    let (searching, set_searching) = signal(false);
    let pending = StoredValue::new_local(None::<Timeout>);

    let visible = move || visible_results(results.get(), &exclude.get());

    let run_search = move |q: String| {
        let api = ctx.api();
        set_searching.set(true);
        spawn_local(async move {
            let found = api.search_users(&q).await;
            // a newer keystroke superseded this request
            if query.try_get_untracked().as_deref() != Some(q.as_str()) {
                return;
            }
            let _ = set_searching.try_set(false);
            match found {
                Ok(users) => {
                    let _ = set_results.try_set(users);
                    let _ = set_selected_idx.try_set(0);
                }
                Err(e) => log::warn!("[API] user search failed: {}", ctx.error_text(&e)),
            }
        });
    };

    let on_input = move |ev: web_sys::Event| {
        let q = event_target_value(&ev);
        set_query.set(q.clone());
        if q.trim().is_empty() {
            pending.set_value(None);
            set_results.set(Vec::new());
            return;
        }
        // replacing the timeout cancels the previous one
        pending.set_value(Some(Timeout::new(DEBOUNCE_MS, move || run_search(q))));
    };

    let pick = move |user: User| {
        on_pick.run(user);
        set_query.set(String::new());
        set_results.set(Vec::new());
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let count = visible().len();
        match ev.key().as_str() {
            "ArrowDown" if count > 0 => {
                ev.prevent_default();
                set_selected_idx.update(|i| *i = (*i + 1) % count);
            }
            "ArrowUp" if count > 0 => {
                ev.prevent_default();
                set_selected_idx.update(|i| *i = (*i + count - 1) % count);
            }
            "Enter" => {
                ev.prevent_default();
                if let Some(user) = visible().into_iter().nth(selected_idx.get_untracked()) {
                    pick(user);
                }
            }
            "Escape" => set_results.set(Vec::new()),
            _ => {}
        }
    };

    view! {
        <div class="member-search">
            <input
                type="text"
                placeholder=placeholder.unwrap_or_else(|| "Search by name or email...".to_string())
                prop:value=move || query.get()
                on:input=on_input
                on:keydown=on_keydown
            />
            <Show when=move || searching.get()>
                <div class="member-search-hint">"Searching..."</div>
            </Show>
            <ul class="member-search-results">
                {move || visible().into_iter().enumerate().map(|(i, user)| {
                    let is_selected = move || selected_idx.get() == i;
                    let name = user.name.clone();
                    let email = user.email.clone();
                    let avatar = user.avatar.clone();
                    view! {
                        <li
                            class=move || if is_selected() { "member-result selected" } else { "member-result" }
                            on:mousedown=move |ev| {
                                ev.prevent_default();
                                pick(user.clone());
                            }
                        >
                            <Avatar name=name.clone() url=avatar small=true />
                            <span class="member-name">{name}</span>
                            <span class="member-email">{email}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u32) -> User {
        User { id, name: format!("User {}", id), email: format!("u{}@example.com", id), avatar: None }
    }

    #[test]
    fn test_visible_results_excludes_and_caps() {
        let all: Vec<User> = (1..=10).map(user).collect();
        let shown = visible_results(all, &[1, 2]);
        assert_eq!(shown.len(), MAX_RESULTS);
        assert_eq!(shown[0].id, 3);
    }
}
