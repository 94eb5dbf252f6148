//! HTTP implementation of the remote port.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, Collection, ImageUpload, RemotePort, UploadEndpoint};
use crate::config::ServerConfig;
use crate::model::{EntityId, ProcessResponse};

/// User agent for API requests
const USER_AGENT: &str = concat!("Optik/", env!("CARGO_PKG_VERSION"));

/// Grading service client
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured server
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::debug!("API client targeting {}", base_url);
        Ok(Self { http, base_url })
    }

    /// Base URL all endpoints are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    /// Send a request and hand back the response if it was a success
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = error_body(status, response.text().await);
            tracing::warn!("{} {}", status, response_summary(&body));
            return Err(ApiError::status(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Send a request and decode its JSON body
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl RemotePort for ApiClient {
    async fn list<T>(&self, collection: Collection) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.url(collection.path())?;
        tracing::debug!("GET {}", url);
        self.fetch(self.http.get(url)).await
    }

    async fn get<T>(&self, collection: Collection, id: EntityId) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.url(&collection.item_path(id))?;
        tracing::debug!("GET {}", url);
        self.fetch(self.http.get(url)).await
    }

    async fn create<B, T>(&self, collection: Collection, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.url(collection.path())?;
        let payload = serde_json::to_vec(body)?;
        tracing::debug!("POST {}", url);
        let request = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);
        self.fetch(request).await
    }

    async fn update<B, T>(&self, collection: Collection, id: EntityId, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.url(&collection.item_path(id))?;
        let payload = serde_json::to_vec(body)?;
        tracing::debug!("PUT {}", url);
        let request = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);
        self.fetch(request).await
    }

    async fn delete(&self, collection: Collection, id: EntityId) -> Result<(), ApiError> {
        let url = self.url(&collection.item_path(id))?;
        tracing::debug!("DELETE {}", url);
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn upload(&self, endpoint: UploadEndpoint, image: ImageUpload) -> Result<ProcessResponse, ApiError> {
        let url = self.url(endpoint.path())?;
        tracing::info!("Uploading {} ({} bytes) to {}", image.file_name(), image.len(), url);

        let mime = image.mime_type();
        let file_name = image.file_name().to_string();
        let part = reqwest::multipart::Part::bytes(image.into_bytes())
            .file_name(file_name)
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("image", part);

        self.fetch(self.http.post(url).multipart(form)).await
    }
}

/// Parse the configured base URL, making sure relative joins stay below it
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl(format!("unsupported scheme '{}'", other))),
    }
}

/// Text of an error response; an unreadable body counts as empty
fn error_body<E: std::fmt::Display>(status: StatusCode, body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| {
        tracing::warn!("Could not read body of {} response: {}", status, e);
        String::new()
    })
}

/// First line of a response body, shortened for logs
fn response_summary(body: &str) -> String {
    let line = body.lines().next().unwrap_or_default();
    if line.chars().count() > 120 {
        let short: String = line.chars().take(120).collect();
        format!("{}...", short)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_appends_slash() {
        let url = normalize_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
        assert_eq!(
            url.join("courses/3/").unwrap().as_str(),
            "http://localhost:8000/api/courses/3/"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_bad_input() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("ftp://example.com/api/"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_client_resolves_endpoints() {
        let config = ServerConfig {
            base_url: "https://grading.example.edu/api/".to_string(),
            ..ServerConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.url(Collection::Students.path()).unwrap().as_str(),
            "https://grading.example.edu/api/students/"
        );
        assert_eq!(
            client.url(UploadEndpoint::ProcessForm.path()).unwrap().as_str(),
            "https://grading.example.edu/api/process/"
        );
    }

    #[test]
    fn test_unreadable_error_body_counts_as_empty() {
        let read: Result<String, String> = Err("connection reset".to_string());
        let body = error_body(StatusCode::BAD_GATEWAY, read);
        assert_eq!(body, "");
        assert!(matches!(
            ApiError::status(502, body),
            ApiError::Status { status: 502, body: None }
        ));

        let read: Result<String, String> = Ok("detail".to_string());
        assert_eq!(error_body(StatusCode::NOT_FOUND, read), "detail");
    }

    #[test]
    fn test_response_summary_truncates() {
        let long = "x".repeat(300);
        assert_eq!(response_summary(&long).len(), 123);
        assert_eq!(response_summary("first\nsecond"), "first");
    }
}
