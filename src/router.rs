//! Hash Router
//!
//! Maps `location.hash` to pages. Hash routing keeps the app servable from
//! any static host.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Project(u32),
    Task(u32),
    MyTasks,
    Profile,
    Settings,
    NotFound,
}

impl Route {
    /// Parse `#/project/4`, `/project/4` or `project/4` alike.
    pub fn parse(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut parts = path.split('/').filter(|p| !p.is_empty());

        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => Route::Home,
            (Some("login"), None, _) => Route::Login,
            (Some("mytasks"), None, _) => Route::MyTasks,
            (Some("profile"), None, _) => Route::Profile,
            (Some("settings"), None, _) => Route::Settings,
            (Some("project"), Some(id), None) => id.parse().map(Route::Project).unwrap_or(Route::NotFound),
            (Some("task"), Some(id), None) => id.parse().map(Route::Task).unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    pub fn href(&self) -> String {
        match self {
            Route::Login => "#/login".to_string(),
            Route::Home | Route::NotFound => "#/".to_string(),
            Route::Project(id) => format!("#/project/{}", id),
            Route::Task(id) => format!("#/task/{}", id),
            Route::MyTasks => "#/mytasks".to_string(),
            Route::Profile => "#/profile".to_string(),
            Route::Settings => "#/settings".to_string(),
        }
    }
}

pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|h| Route::parse(&h))
        .unwrap_or(Route::Home)
}

pub fn navigate(route: Route) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(&route.href());
    }
}

/// Route signal kept in sync with `hashchange`
pub fn use_hash_route() -> ReadSignal<Route> {
    let (route, set_route) = signal(current_route());

    if let Some(window) = web_sys::window() {
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            let next = current_route();
            log::debug!("[APP] route -> {:?}", next);
            let _ = set_route.try_set(next);
        });
        let _ = window.add_event_listener_with_callback("hashchange", on_change.as_ref().unchecked_ref());
        on_change.forget();
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/login"), Route::Login);
        assert_eq!(Route::parse("#/project/12"), Route::Project(12));
        assert_eq!(Route::parse("#/task/7/"), Route::Task(7));
        assert_eq!(Route::parse("#/mytasks"), Route::MyTasks);
        assert_eq!(Route::parse("#/settings?tab=theme"), Route::Settings);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Route::parse("#/project/abc"), Route::NotFound);
        assert_eq!(Route::parse("#/project"), Route::NotFound);
        assert_eq!(Route::parse("#/task/1/extra"), Route::NotFound);
        assert_eq!(Route::parse("#/nowhere"), Route::NotFound);
    }

    #[test]
    fn test_href_round_trips() {
        for route in [Route::Login, Route::Home, Route::Project(3), Route::Task(9), Route::Profile] {
            assert_eq!(Route::parse(&route.href()), route);
        }
    }
}
