//! HTTP transport
//!
//! One shared `reqwest::Client` with a fixed base URL and a cookie store
//! (the backend keeps its session in a cookie). Everything above this layer
//! talks to the [`HttpClient`] trait so it can run against any transport.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::media::MediaFile;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// Multipart upload with the file in the `file` field
    async fn upload<T: DeserializeOwned>(&self, path: &str, file: &MediaFile) -> ClientResult<T>;
    fn base_url(&self) -> &str;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base_url {}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, path: &str, req: RequestBuilder) -> ClientResult<T> {
        tracing::debug!(method, path, "Sending request");
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = status.as_u16(), "Request rejected");
            return Err(ClientError::from_status(status, &text));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("failed to decode response body: {}", e))
        })
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.get(self.url(path));
        self.send("GET", path, req).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let req = self.client.get(self.url(path)).query(query);
        self.send("GET", path, req).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.send("POST", path, req).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.post(self.url(path));
        self.send("POST", path, req).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.put(self.url(path)).json(body);
        self.send("PUT", path, req).await
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, file: &MediaFile) -> ClientResult<T> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = self.client.post(self.url(path)).multipart(form);
        self.send("POST", path, req).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Turns a media URL from the API into an absolute one.
///
/// Absolute URLs pass through; relative ones (`/static/uploads/x.jpg`) are
/// prefixed with the origin of the API base.
pub fn resolve_media_url(base_url: &str, media_url: &str) -> String {
    if Url::parse(media_url).is_ok() {
        return media_url.to_string();
    }
    match Url::parse(base_url) {
        Ok(base) => format!(
            "{}/{}",
            base.origin().ascii_serialization(),
            media_url.trim_start_matches('/')
        ),
        Err(_) => media_url.to_string(),
    }
}
