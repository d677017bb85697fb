//! REST Client
//!
//! Thin wrappers over the Planify backend, organized by domain.
//! Every request carries the stored bearer token; a 401 clears it and
//! sends the user back to the login page.

mod auth;
mod board;
mod projects;
mod tasks;
mod users;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::AppConfig;

pub use auth::{clear_token, load_token};
pub use projects::NewProject;
pub use tasks::TaskPatch;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("browser storage unavailable")]
    Storage,
    #[error("{0}")]
    Browser(String),
    #[error("invalid request url: {0}")]
    Url(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Url(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base: config.api_base.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Endpoint paths are written `/projects/4`; they stay under the base
    /// path instead of replacing it.
    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let req = self.http.request(method, self.url(path)?);
        Ok(match load_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }

    async fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let res = req.send().await?;
        let status = res.status();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("[API] 401, clearing session");
            clear_token();
            redirect_to_login();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body, status.as_u16()),
            });
        }
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = self.send(self.request(Method::GET, path)?).await?;
        Ok(res.json().await?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.send(self.request(method, path)?.json(body)).await?;
        Ok(res.json().await?)
    }

    /// For endpoints whose response body is irrelevant
    async fn send_unit<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> ApiResult<()> {
        self.send(self.request(method, path)?.json(body)).await?;
        Ok(())
    }

    async fn send_form<T: DeserializeOwned>(&self, path: &str, form: reqwest::multipart::Form) -> ApiResult<T> {
        let res = self.send(self.request(Method::POST, path)?.multipart(form)).await?;
        Ok(res.json().await?)
    }
}

/// Backend errors look like `{"error": "..."}`
pub(crate) fn error_message(body: &str, status: u16) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed: {}", status)
    } else {
        body.to_string()
    }
}

fn redirect_to_login() {
    if let Some(location) = web_sys::window().map(|w| w.location()) {
        let on_login = location.hash().map(|h| h.starts_with("#/login")).unwrap_or(false);
        if !on_login {
            let _ = location.set_hash("#/login");
        }
    }
}

/// Read a picked file into a multipart form under `file`
pub(crate) async fn file_form(file: &web_sys::File) -> ApiResult<reqwest::multipart::Form> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Browser(format!("could not read file: {:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file.name());
    Ok(reqwest::multipart::Form::new().part("file", part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_error() {
        assert_eq!(error_message(r#"{"error":"Invalid payload"}"#, 400), "Invalid payload");
        assert_eq!(error_message("plain failure", 500), "plain failure");
        assert_eq!(error_message("  ", 502), "Request failed: 502");
    }

    #[test]
    fn test_api_error_display() {
        let e = ApiError::Status { status: 409, message: "Conflict on position".into() };
        assert_eq!(e.to_string(), "Conflict on position");
        assert_eq!(ApiError::Unauthorized.to_string(), "unauthorized");
    }

    #[test]
    fn test_url_join() {
        let client = ApiClient::new(&AppConfig::from_values(Some("http://localhost:8080/api/"), None));
        assert_eq!(client.url("/projects/4").unwrap().as_str(), "http://localhost:8080/api/projects/4");
        assert_eq!(
            client.url("/users/search?q=ada%20l").unwrap().as_str(),
            "http://localhost:8080/api/users/search?q=ada%20l"
        );

        let client = ApiClient::new(&AppConfig::from_values(Some("https://planify.example.com/api"), None));
        assert_eq!(client.url("me/settings").unwrap().as_str(), "https://planify.example.com/api/me/settings");
    }
}
