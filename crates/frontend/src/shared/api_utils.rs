//! API utilities for frontend-backend communication
//!
//! Адрес API и общие CRUD-запросы (JSON, `Authorization: Bearer`).
//! Все функции возвращают `Result<_, String>`; не-2xx ответ даёт `"HTTP <status>"`.

use contracts::shared::list_view::Draft;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::shared::config::app_config;
use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// `api.base_url` из конфигурации, иначе текущий хост с портом `api.port`.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let api = &app_config().api;
    if let Some(base_url) = &api.base_url {
        return base_url.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/assets");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// URL конкретной записи: `{endpoint}/{id}` с экранированием id
pub fn item_path(endpoint: &str, id: &str) -> String {
    format!("{}/{}", endpoint, urlencoding::encode(id))
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::auth_header() {
        Some(header) => builder.header("Authorization", &header),
        None => builder,
    }
}

fn check_status(response: Response) -> Result<Response, String> {
    if response.ok() {
        Ok(response)
    } else {
        Err(format!("HTTP {}", response.status()))
    }
}

/// `GET {endpoint}` → JSON array
pub async fn fetch_list<T: DeserializeOwned>(endpoint: &str) -> Result<Vec<T>, String> {
    let response = with_auth(Request::get(&api_url(endpoint)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    check_status(response)?
        .json::<Vec<T>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// `POST {endpoint}`, тело: поля черновика
pub async fn create_item(endpoint: &str, draft: &Draft) -> Result<(), String> {
    let response = with_auth(Request::post(&api_url(endpoint)))
        .json(&draft.to_json())
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    check_status(response).map(|_| ())
}

/// `PUT {endpoint}/{id}`
pub async fn update_item(endpoint: &str, id: &str, draft: &Draft) -> Result<(), String> {
    let response = with_auth(Request::put(&api_url(&item_path(endpoint, id))))
        .json(&draft.to_json())
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    check_status(response).map(|_| ())
}

/// `DELETE {endpoint}/{id}`
pub async fn delete_item(endpoint: &str, id: &str) -> Result<(), String> {
    let response = with_auth(Request::delete(&api_url(&item_path(endpoint, id))))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    check_status(response).map(|_| ())
}
