//! Auth
//!
//! Login and bearer-token storage in localStorage.

use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiError, ApiResult};
use crate::config::TOKEN_KEY;
use crate::models::LoginResponse;

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok()?.filter(|t| !t.is_empty())
}

pub fn store_token(token: &str) -> ApiResult<()> {
    storage()
        .ok_or(ApiError::Storage)?
        .set_item(TOKEN_KEY, token)
        .map_err(|_| ApiError::Storage)
}

pub fn clear_token() {
    if let Some(s) = storage() {
        let _ = s.remove_item(TOKEN_KEY);
    }
}

impl ApiClient {
    /// `POST /login`; stores the returned token
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let res: LoginResponse = self
            .send_json(Method::POST, "/login", &LoginArgs { email: email.trim(), password })
            .await?;
        store_token(&res.token)?;
        log::info!("[API] logged in as {}", email.trim());
        Ok(res.token)
    }
}
