//! User Endpoints
//!
//! Search, the signed-in user's profile, tasks, summary and settings.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{file_form, ApiClient, ApiResult};
use crate::models::{Summary, User, UserSettings, UserTask};

#[derive(Serialize)]
struct ProfileArgs<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordArgs<'a> {
    new_password: &'a str,
}

#[derive(Deserialize)]
struct AvatarResponse {
    url: String,
}

pub(crate) fn search_path(query: &str) -> String {
    format!("/users/search?q={}", utf8_percent_encode(query.trim(), NON_ALPHANUMERIC))
}

impl ApiClient {
    /// Empty queries return nothing without a request
    pub async fn search_users(&self, query: &str) -> ApiResult<Vec<User>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let users: Option<Vec<User>> = self.get_json(&search_path(query)).await?;
        Ok(users.unwrap_or_default())
    }

    pub async fn get_me(&self) -> ApiResult<User> {
        self.get_json("/me").await
    }

    pub async fn update_me(&self, name: &str, email: &str) -> ApiResult<User> {
        self.send_json(Method::PATCH, "/me", &ProfileArgs { name: name.trim(), email: email.trim() })
            .await
    }

    /// Returns the stored avatar URL as given by the server
    pub async fn upload_avatar(&self, file: &web_sys::File) -> ApiResult<String> {
        let form = file_form(file).await?;
        let res: AvatarResponse = self.send_form("/me/avatar", form).await?;
        Ok(res.url)
    }

    pub async fn change_password(&self, new_password: &str) -> ApiResult<()> {
        self.send_unit(Method::PATCH, "/me/password", &PasswordArgs { new_password }).await
    }

    pub async fn my_tasks(&self) -> ApiResult<Vec<UserTask>> {
        let tasks: Option<Vec<UserTask>> = self.get_json("/me/tasks").await?;
        Ok(tasks.unwrap_or_default())
    }

    pub async fn my_summary(&self) -> ApiResult<Summary> {
        self.get_json("/me/summary").await
    }

    pub async fn get_settings(&self) -> ApiResult<UserSettings> {
        self.get_json("/me/settings").await
    }

    pub async fn update_settings(&self, settings: &UserSettings) -> ApiResult<()> {
        self.send_unit(Method::PATCH, "/me/settings", settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_path_encodes_query() {
        assert_eq!(search_path("ada"), "/users/search?q=ada");
        assert_eq!(search_path(" a b@x.io "), "/users/search?q=a%20b%40x%2Eio");
    }
}
