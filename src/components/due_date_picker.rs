//! Due Date Picker Component

use leptos::prelude::*;

use crate::dates;

/// Date input plus a clear button; `on_change(None)` clears the date
#[component]
pub fn DueDatePicker(
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] on_change: Callback<Option<String>>,
) -> impl IntoView {
    let overdue = move || value.get().map(|d| dates::is_overdue(&d, dates::today())).unwrap_or(false);

    view! {
        <span class=move || if overdue() { "due-date-picker overdue" } else { "due-date-picker" }>
            <input
                type="date"
                prop:value=move || dates::input_value(value.get().as_deref())
                on:change=move |ev| {
                    let v = event_target_value(&ev);
                    on_change.run(Some(v).filter(|v| !v.is_empty()));
                }
            />
            <Show when=move || value.get().is_some()>
                <button class="due-date-clear" title="Clear" on:click=move |_| on_change.run(None)>"×"</button>
            </Show>
        </span>
    }
}
