//! Add Person Dialog
//!
//! Modal wrapping the member search, used for project members and for
//! task assignees / collaborators.

use leptos::prelude::*;

use crate::components::{MemberSearch, Modal};
use crate::models::User;

#[component]
pub fn AddPersonDialog(
    #[prop(into)] title: String,
    #[prop(into)] exclude: Signal<Vec<u32>>,
    #[prop(into)] on_pick: Callback<User>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Modal title=title on_close=on_close>
            <MemberSearch exclude=exclude on_pick=on_pick />
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
        </Modal>
    }
}
