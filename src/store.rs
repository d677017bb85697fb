//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::config::THEME_KEY;
use crate::models::{Project, User, UserSettings};

/// Data shared between the sidebar, navbar and pages
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Sidebar project list
    pub projects: Vec<Project>,
    /// Signed-in user
    pub me: Option<User>,
    pub settings: Option<UserSettings>,
    /// "Automatic", "Light" or "Dark"
    pub theme_preference: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            theme_preference: load_theme_preference(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Add or replace a project by ID
pub fn store_upsert_project(store: &AppStore, project: Project) {
    let projects = store.projects();
    upsert_project(&mut projects.write(), project);
}

fn upsert_project(projects: &mut Vec<Project>, project: Project) {
    match projects.iter_mut().find(|p| p.id == project.id) {
        Some(existing) => *existing = project,
        None => projects.push(project),
    }
}

/// Apply saved settings and remember the theme locally
pub fn store_set_settings(store: &AppStore, settings: UserSettings) {
    store_set_theme(store, &settings.appearance_theme);
    store.settings().set(Some(settings));
}

pub fn store_set_theme(store: &AppStore, preference: &str) {
    save_theme_preference(preference);
    store.theme_preference().set(preference.to_string());
}

pub fn store_clear_session(store: &AppStore) {
    store.projects().write().clear();
    store.me().set(None);
    store.settings().set(None);
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn load_theme_preference() -> String {
    local_storage()
        .and_then(|s| s.get_item(THEME_KEY).ok().flatten())
        .unwrap_or_else(|| "Automatic".to_string())
}

fn save_theme_preference(preference: &str) {
    if let Some(s) = local_storage() {
        let _ = s.set_item(THEME_KEY, preference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: u32, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            description: None,
            created_at: None,
        }
    }

    #[test]
    fn test_upsert_project() {
        let mut projects = vec![project(1, "Launch"), project(2, "Docs")];

        upsert_project(&mut projects, project(2, "Docs v2"));
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].name, "Docs v2");

        upsert_project(&mut projects, project(3, "Ops"));
        assert_eq!(projects.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
