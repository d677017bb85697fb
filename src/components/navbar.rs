//! Navbar Component
//!
//! Top bar with the signed-in user and logout.

use leptos::prelude::*;

use crate::components::Avatar;
use crate::context::use_app_context;
use crate::router::Route;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    view! {
        <header class="navbar">
            <a class="navbar-brand" href=Route::Home.href()>"Planify"</a>
            <div class="navbar-spacer"></div>
            {move || store.me().get().map(|me| view! {
                <a class="navbar-user" href=Route::Profile.href()>
                    <Avatar name=me.name.clone() url=me.avatar.clone() small=true />
                    <span>{me.name}</span>
                </a>
            })}
            <button class="navbar-logout" on:click=move |_| ctx.logout()>"Log out"</button>
        </header>
    }
}
