//! Avatar Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Up to two uppercase initials ("Ada Lovelace" -> "AL")
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Round avatar; falls back to initials without a picture
#[component]
pub fn Avatar(
    #[prop(into)] name: String,
    #[prop(optional_no_strip)] url: Option<String>,
    #[prop(optional)] small: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    let class = if small { "avatar small" } else { "avatar" };
    let url = url.filter(|u| !u.is_empty()).map(|u| ctx.asset_url(&u));

    match url {
        Some(src) => view! { <img class=class src=src alt=name.clone() title=name /> }.into_any(),
        None => view! { <span class=class title=name.clone()>{initials(&name)}</span> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("grace"), "G");
        assert_eq!(initials("  "), "?");
        assert_eq!(initials("Jean Luc Picard"), "JL");
    }
}
