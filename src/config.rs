//! App Configuration
//!
//! Compile-time settings, storage keys and the time-of-day theme.

use std::str::FromStr;

use log::LevelFilter;
use url::Url;

/// localStorage key for the bearer token
pub const TOKEN_KEY: &str = "planify_token";

/// localStorage key caching the appearance preference between sessions
pub const THEME_KEY: &str = "planify_theme";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST base, always ending in `/` so paths join under it
    /// (e.g. `http://localhost:8080/api/`)
    pub api_base: Url,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Values baked in at build time via `PLANIFY_API_BASE_URL` / `PLANIFY_LOG`
    pub fn from_env() -> Self {
        Self::from_values(option_env!("PLANIFY_API_BASE_URL"), option_env!("PLANIFY_LOG"))
    }

    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base = api_base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| match parse_base(s) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("[CONFIG] ignoring API base {:?}: {}", s, e);
                    None
                }
            })
            .unwrap_or_else(default_base);
        let log_level = log_level
            .and_then(|s| LevelFilter::from_str(s.trim()).ok())
            .unwrap_or(LevelFilter::Info);
        Self { api_base, log_level }
    }

    /// `scheme://host[:port]` of the API
    pub fn api_origin(&self) -> String {
        self.api_base.origin().ascii_serialization()
    }

    /// Uploaded files come back as server-relative paths, resolved against
    /// the API origin rather than the `/api` prefix. Anything that does not
    /// end up as http(s) becomes `#`.
    pub fn resolve_asset_url(&self, url: &str) -> String {
        match self.api_base.join("/").and_then(|root| root.join(url.trim())) {
            Ok(resolved) if matches!(resolved.scheme(), "http" | "https") => resolved.into(),
            Ok(resolved) => {
                log::debug!("[CONFIG] refusing {} asset url", resolved.scheme());
                "#".to_string()
            }
            Err(e) => {
                log::debug!("[CONFIG] unresolvable asset url {:?}: {}", url, e);
                "#".to_string()
            }
        }
    }
}

fn parse_base(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn default_base() -> Url {
    match parse_base(DEFAULT_API_BASE_URL) {
        Ok(url) => url,
        Err(_) => unreachable!("default API base is a valid URL"),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

/// Time-of-day palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dawn,
    Morning,
    Afternoon,
    Night,
}

impl Theme {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            2..=5 => Theme::Dawn,
            6..=14 => Theme::Morning,
            15..=19 => Theme::Afternoon,
            _ => Theme::Night,
        }
    }

    /// Theme for the stored appearance preference
    pub fn for_preference(preference: &str, hour: u32) -> Self {
        match preference {
            "Light" => Theme::Morning,
            "Dark" => Theme::Night,
            _ => Theme::for_hour(hour),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Dawn => "theme-dawn",
            Theme::Morning => "theme-morning",
            Theme::Afternoon => "theme-afternoon",
            Theme::Night => "theme-night",
        }
    }
}

/// Local hour from the browser clock
pub fn local_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base.as_str(), "http://localhost:8080/api/");
        assert_eq!(cfg.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_from_values_trims() {
        let cfg = AppConfig::from_values(Some(" https://planify.example.com/api/ "), Some("debug"));
        assert_eq!(cfg.api_base.as_str(), "https://planify.example.com/api/");
        assert_eq!(cfg.log_level, LevelFilter::Debug);

        let cfg = AppConfig::from_values(Some(""), Some("loud"));
        assert_eq!(cfg.api_base.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(cfg.log_level, LevelFilter::Info);

        let cfg = AppConfig::from_values(Some("not a url"), None);
        assert_eq!(cfg.api_base.as_str(), DEFAULT_API_BASE_URL);

        let cfg = AppConfig::from_values(Some("https://planify.example.com/api"), None);
        assert_eq!(cfg.api_base.as_str(), "https://planify.example.com/api/");
    }

    #[test]
    fn test_asset_urls() {
        let cfg = AppConfig::from_values(Some("http://localhost:8080/api"), None);
        assert_eq!(cfg.api_origin(), "http://localhost:8080");
        assert_eq!(cfg.resolve_asset_url("/uploads/a.png"), "http://localhost:8080/uploads/a.png");
        assert_eq!(cfg.resolve_asset_url("uploads/a.png"), "http://localhost:8080/uploads/a.png");
        assert_eq!(cfg.resolve_asset_url("https://cdn.example.com/x.png"), "https://cdn.example.com/x.png");
    }

    #[test]
    fn test_protocol_relative_asset_keeps_its_host() {
        let cfg = AppConfig::from_values(Some("http://localhost:8080/api"), None);
        assert_eq!(cfg.resolve_asset_url("//cdn.example.com/a.png"), "http://cdn.example.com/a.png");

        let cfg = AppConfig::from_values(Some("https://planify.example.com:8443/api/v1"), None);
        assert_eq!(cfg.api_origin(), "https://planify.example.com:8443");
        assert_eq!(cfg.resolve_asset_url("/uploads/a.png"), "https://planify.example.com:8443/uploads/a.png");
    }

    #[test]
    fn test_script_asset_urls_are_refused() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.resolve_asset_url("javascript:alert(1)"), "#");
        assert_eq!(cfg.resolve_asset_url("JaVaScRiPt://%0Aalert(1)"), "#");
        assert_eq!(cfg.resolve_asset_url("http://[::1"), "#");
    }

    #[test]
    fn test_theme_by_hour() {
        assert_eq!(Theme::for_hour(1), Theme::Night);
        assert_eq!(Theme::for_hour(2), Theme::Dawn);
        assert_eq!(Theme::for_hour(6), Theme::Morning);
        assert_eq!(Theme::for_hour(14), Theme::Morning);
        assert_eq!(Theme::for_hour(15), Theme::Afternoon);
        assert_eq!(Theme::for_hour(20), Theme::Night);
        assert_eq!(Theme::for_preference("Dark", 9), Theme::Night);
        assert_eq!(Theme::for_preference("Automatic", 9), Theme::Morning);
    }
}
