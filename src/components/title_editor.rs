//! Title Editor Component
//!
//! Heading that turns into an input on click. Enter or blur saves,
//! Escape cancels. Empty titles are rejected.

use leptos::prelude::*;

#[component]
pub fn TitleEditor(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_save: Callback<String>,
) -> impl IntoView {
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());

    let start = move |_| {
        set_draft.set(value.get_untracked());
        set_editing.set(true);
    };

    let commit = move || {
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        let next = draft.get_untracked().trim().to_string();
        if !next.is_empty() && next != value.get_untracked() {
            on_save.run(next);
        }
    };

    view! {
        <Show
            when=move || editing.get()
            fallback=move || view! { <h1 class="title-editor" title="Click to edit" on:click=start>{move || value.get()}</h1> }
        >
            <input
                class="title-editor-input"
                type="text"
                autofocus=true
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:blur=move |_| commit()
                on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                    "Enter" => commit(),
                    "Escape" => set_editing.set(false),
                    _ => {}
                }
            />
        </Show>
    }
}
