//! Planify Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod dates;
mod logging;
mod markdown;
mod models;
mod pages;
mod router;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(config::AppConfig::from_env().log_level);
    mount_to_body(App);
}
