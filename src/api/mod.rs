use crate::models::{Article, Folder, StoredRecord};
use crate::storage::load_token_from_storage;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    /// Backend base URL from `window.ENV` injected by the host page.
    /// Accepts `API_URL` and the older `api_url` spelling.
    pub fn new() -> Self {
        let api_url = Self::window_env_string("API_URL")
            .or_else(|| Self::window_env_string("api_url"))
            .unwrap_or_else(|| "http://localhost:6688".to_string());

        Self { api_url }
    }

    fn window_env_string(key: &str) -> Option<String> {
        let env = web_sys::window()?.get("ENV")?;
        if env.is_undefined() || !env.is_object() {
            return None;
        }
        js_sys::Reflect::get(&env, &key.into()).ok()?.as_string()
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_api_url() -> String {
    EnvConfig::new().api_url
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct GetContentListRequest {
    #[serde(rename = "user-id")]
    pub user_id: String,

    /// Restrict to one folder (omit for the profile root).
    #[serde(rename = "folder-id", skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DeleteRecordRequest {
    pub id: i64,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let base_url = get_api_url();
        let token = load_token_from_storage();

        Self { base_url, token }
    }

    pub(crate) fn get_auth_token(&self) -> Option<String> {
        self.token.clone()
    }

    #[allow(dead_code)]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn request_api<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.post(url);
        req = Self::with_auth_headers(req, self.get_auth_token());

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub(crate) fn parse_article_list_response(data: serde_json::Value) -> Vec<Article> {
        let list = data
            .get("article-list")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut out: Vec<Article> = Vec::with_capacity(list.len());
        for item in list {
            if let Ok(article) = serde_json::from_value::<Article>(item) {
                // Rows without a persisted id cannot be linked or mutated.
                if article.id.is_some() {
                    out.push(article);
                }
            }
        }

        out
    }

    pub(crate) fn parse_folder_list_response(data: serde_json::Value) -> Vec<Folder> {
        let list = data
            .get("folder-list")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut out: Vec<Folder> = Vec::with_capacity(list.len());
        for item in list {
            if let Ok(folder) = serde_json::from_value::<Folder>(item) {
                if folder.id.is_some() {
                    out.push(folder);
                }
            }
        }

        out
    }

    /// Save responses have been observed with different shapes; accept the
    /// documented `{"records": [...]}` plus a bare record or bare array.
    pub(crate) fn parse_stored_records(data: serde_json::Value) -> Vec<StoredRecord> {
        if let Some(list) = data.get("records").and_then(|v| v.as_array()) {
            return list
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect();
        }

        if let Some(list) = data.as_array() {
            return list
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect();
        }

        serde_json::from_value::<StoredRecord>(data)
            .map(|r| vec![r])
            .unwrap_or_default()
    }

    pub async fn get_article_list(
        &self,
        user_id: &str,
        folder_id: Option<i64>,
    ) -> ApiResult<Vec<Article>> {
        let data: serde_json::Value = self
            .request_api(
                "/mdreader/get-article-list",
                Some(&GetContentListRequest {
                    user_id: user_id.to_string(),
                    folder_id,
                }),
            )
            .await?;
        Ok(Self::parse_article_list_response(data))
    }

    pub async fn get_folder_list(
        &self,
        user_id: &str,
        folder_id: Option<i64>,
    ) -> ApiResult<Vec<Folder>> {
        let data: serde_json::Value = self
            .request_api(
                "/mdreader/get-folder-list",
                Some(&GetContentListRequest {
                    user_id: user_id.to_string(),
                    folder_id,
                }),
            )
            .await?;
        Ok(Self::parse_folder_list_response(data))
    }

    /// Create (no `id`) or update (with `id`) an article.
    pub async fn store_article(&self, article: &Article) -> ApiResult<Vec<StoredRecord>> {
        let data: serde_json::Value = self
            .request_api("/mdreader/save-article", Some(article))
            .await?;
        Ok(Self::parse_stored_records(data))
    }

    /// Create (no `id`) or update (with `id`) a folder.
    pub async fn store_folder(&self, folder: &Folder) -> ApiResult<Vec<StoredRecord>> {
        let data: serde_json::Value = self
            .request_api("/mdreader/save-folder", Some(folder))
            .await?;
        Ok(Self::parse_stored_records(data))
    }

    pub async fn remove_article(&self, id: i64) -> ApiResult<()> {
        let _: serde_json::Value = self
            .request_api("/mdreader/delete-article", Some(&DeleteRecordRequest { id }))
            .await?;
        Ok(())
    }

    pub async fn remove_folder(&self, id: i64) -> ApiResult<()> {
        let _: serde_json::Value = self
            .request_api("/mdreader/delete-folder", Some(&DeleteRecordRequest { id }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_article_list_contract() {
        // Contract based on mdreader-rust: handlers/content.rs
        let data = serde_json::json!({
            "article-list": [
                {"id": 1, "name": "A", "slug": "a", "featured": true, "description": "d"},
                {"id": 2, "name": "B", "slug": "b"},
                {"name": "draft without id", "slug": "x"}
            ]
        });
        let parsed = ApiClient::parse_article_list_response(data);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, Some(1));
        assert!(parsed[0].featured);
        assert_eq!(parsed[1].description, "");
    }

    #[test]
    fn test_parse_folder_list_contract() {
        let data = serde_json::json!({
            "folder-list": [{"id": 7, "name": "Notes"}]
        });
        let parsed = ApiClient::parse_folder_list_response(data);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, Some(7));
        assert_eq!(parsed[0].name, "Notes");
    }

    #[test]
    fn test_parse_stored_records_documented_shape() {
        let data = serde_json::json!({"records": [{"id": 42}]});
        let parsed = ApiClient::parse_stored_records(data);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, 42);
    }

    #[test]
    fn test_parse_stored_records_bare_shapes() {
        let parsed = ApiClient::parse_stored_records(serde_json::json!({"id": 9}));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, 9);

        let parsed = ApiClient::parse_stored_records(serde_json::json!([{"id": 3}, {"id": 4}]));
        assert_eq!(parsed.len(), 2);

        // Update responses may carry no echo at all.
        let parsed = ApiClient::parse_stored_records(serde_json::json!({}));
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_content_list_request_serialization_uses_kebab_keys() {
        let req = GetContentListRequest {
            user_id: "u-1".to_string(),
            folder_id: Some(5),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["user-id"], "u-1");
        assert_eq!(v["folder-id"], 5);

        let req = GetContentListRequest {
            user_id: "u-1".to_string(),
            folder_id: None,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert!(v.get("folder-id").is_none());
    }

    #[test]
    fn test_api_client_new_has_no_token() {
        let client = ApiClient::new("http://localhost:6688".to_string());
        assert_eq!(client.base_url, "http://localhost:6688");
        assert!(!client.is_authenticated());
        assert!(client.get_auth_token().is_none());
    }
}
