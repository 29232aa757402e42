use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::store::FilterSet;

/// Thin blocking wrapper around the catalog's REST endpoint.
///
/// Shared between worker threads behind an `Arc`; `reqwest::blocking::Client`
/// already pools connections internally.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, with the non-empty filters as query string.
    pub fn endpoint(&self, path: &str, filters: Option<&FilterSet>) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if let Some(query) = filters.map(FilterSet::to_query_string) {
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }
        url
    }

    /// GETs `path` and decodes the JSON body into `T`.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: Option<&FilterSet>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, filters);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: error_body(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Downloads raw bytes, used for poster images.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                body: None,
            });
        }

        let bytes = response
            .bytes()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

// Non-JSON error bodies (proxies, HTML error pages) are kept as plain strings.
fn error_body(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;
    use crate::api::FetchFailure;
    use crate::api::models::Genre;

    #[test]
    fn rejects_base_url_without_scheme() {
        let result = ApiClient::new("localhost:8000", Duration::from_secs(1));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn endpoint_joins_path_and_query() {
        let client = ApiClient::new("http://example.test/api/", Duration::from_secs(1)).unwrap();
        let filters = FilterSet::new().with("title", "Blade Runner").with("genre", "");
        assert_eq!(
            client.endpoint("/movies/", Some(&filters)),
            "http://example.test/api/movies/?title=Blade%20Runner&page=1"
        );
        assert_eq!(client.endpoint("movies/3/", None), "http://example.test/api/movies/3/");
    }

    #[test]
    fn decodes_successful_response() {
        let (base_url, server) = serve_once("200 OK", r#"[{"id":1,"name":"Action"}]"#);
        let client = ApiClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let genres: Vec<Genre> = client.get_json("/genres/", None).unwrap();

        assert_eq!(genres[0].name, "Action");
        assert_eq!(server.join().unwrap(), "GET /api/genres/ HTTP/1.1");
    }

    #[test]
    fn keeps_json_error_body() {
        let (base_url, server) = serve_once(
            "404 Not Found",
            r#"{"success":false,"error":{"code":"NOT_FOUND","message":"Requested resource was not found"}}"#,
        );
        let client = ApiClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let error = client.get_json::<Genre>("/genres/99/", None).unwrap_err();
        server.join().unwrap();

        let failure = FetchFailure::from(&error);
        assert!(failure.is_not_found());
        assert_eq!(failure.message, "Requested resource was not found");
    }

    #[test]
    fn keeps_plain_text_error_body() {
        let (base_url, server) = serve_once("502 Bad Gateway", "upstream unavailable");
        let client = ApiClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let error = client.get_json::<Genre>("/genres/", None).unwrap_err();
        server.join().unwrap();

        assert_eq!(FetchFailure::from(&error).message, "upstream unavailable");
    }

    #[test]
    fn empty_error_body_reports_status() {
        let (base_url, server) = serve_once("500 Internal Server Error", "");
        let client = ApiClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let error = client.get_json::<Genre>("/genres/", None).unwrap_err();
        server.join().unwrap();

        assert_eq!(
            FetchFailure::from(&error).message,
            "Request failed with status code 500"
        );
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let (base_url, server) = serve_once("200 OK", "not json");
        let client = ApiClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let error = client.get_json::<Genre>("/genres/", None).unwrap_err();
        server.join().unwrap();

        assert!(matches!(error, ApiError::Decode(_)));
    }
}
