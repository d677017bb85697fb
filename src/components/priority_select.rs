//! Priority Select Component

use leptos::prelude::*;

use crate::models::Priority;

/// `<select>` value for an optional priority
pub fn option_value(priority: Option<Priority>) -> &'static str {
    priority.map(|p| p.as_str()).unwrap_or("")
}

#[component]
pub fn PrioritySelect(
    #[prop(into)] value: Signal<Option<Priority>>,
    #[prop(into)] on_change: Callback<Option<Priority>>,
) -> impl IntoView {
    view! {
        <select
            class="priority-select"
            prop:value=move || option_value(value.get())
            on:change=move |ev| on_change.run(Priority::parse(&event_target_value(&ev)))
        >
            <option value="">"No priority"</option>
            {Priority::ALL.iter().map(|p| view! {
                <option value=p.as_str()>{p.as_str()}</option>
            }).collect_view()}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_value_round_trip() {
        assert_eq!(option_value(None), "");
        for p in Priority::ALL {
            assert_eq!(Priority::parse(option_value(Some(p))), Some(p));
        }
        assert_eq!(Priority::parse(""), None);
    }
}
