//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::{self, ApiClient, ApiError};
use crate::config::AppConfig;
use crate::router::{navigate, Route};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bearer token; `None` means signed out
    pub token: ReadSignal<Option<String>>,
    set_token: WriteSignal<Option<String>>,
    /// Bumped whenever shared data (projects, me) should be refetched
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    config: StoredValue<AppConfig>,
    // reqwest's wasm client is not Sync
    api: StoredValue<ApiClient, LocalStorage>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let (token, set_token) = signal(api::load_token());
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let api = StoredValue::new_local(ApiClient::new(&config));
        Self {
            token,
            set_token,
            reload_trigger,
            set_reload_trigger,
            config: StoredValue::new(config),
            api,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Server-relative upload paths become absolute
    pub fn asset_url(&self, url: &str) -> String {
        self.config.with_value(|c| c.resolve_asset_url(url))
    }

    /// Called after a successful login
    pub fn signed_in(&self, token: String) {
        self.set_token.set(Some(token));
        self.reload();
        navigate(Route::Home);
    }

    pub fn logout(&self) {
        log::info!("[APP] logout");
        api::clear_token();
        self.set_token.set(None);
        navigate(Route::Login);
    }

    /// A request came back 401; the client already cleared storage
    pub fn session_expired(&self) {
        self.set_token.set(None);
    }

    /// User-facing text for a failed call; a 401 also drops the session
    pub fn error_text(&self, err: &ApiError) -> String {
        if *err == ApiError::Unauthorized {
            self.session_expired();
        }
        err.to_string()
    }

    /// Trigger a reload of shared data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
