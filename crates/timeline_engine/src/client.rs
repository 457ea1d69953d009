use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Method, StatusCode};
use timeline_logging::timeline_debug;
use url::Url;

use crate::decode::{decode_refresh, decode_tweets, DecodeError};
use crate::{ApiError, ApiTweet, FailureKind, RefreshOutcome};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The remote timeline service. Every call is a single request with no retry.
#[async_trait::async_trait]
pub trait TimelineApi: Send + Sync {
    /// Full page `page` (1-based), newest first.
    async fn fetch_page(&self, page: u32) -> Result<Vec<ApiTweet>, ApiError>;
    /// Tweets newer than `since`.
    async fn fetch_since(&self, since: &str) -> Result<Vec<ApiTweet>, ApiError>;
    async fn toggle_favorite(&self, id: &str) -> Result<Vec<ApiTweet>, ApiError>;
    async fn refetch(&self, id: &str) -> Result<RefreshOutcome, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
    async fn trigger_force_reload(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTimelineClient {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestTimelineClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        // Relative joins must extend the base path, not replace its last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn tweet_endpoint(&self, id: &str, suffix: &str) -> Result<Url, ApiError> {
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("invalid tweet id {id:?}"),
            ));
        }
        self.endpoint(&format!("api/{id}{suffix}"))
    }

    /// Sends the request and returns the body, enforcing status and size limits.
    async fn send(&self, method: Method, url: Url) -> Result<Vec<u8>, ApiError> {
        timeline_debug!("{} {}", method, url);
        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    async fn send_for_tweets(&self, method: Method, url: Url) -> Result<Vec<ApiTweet>, ApiError> {
        let body = self.send(method, url).await?;
        decode_tweets(&body).map_err(map_decode_error)
    }

    fn too_large(&self, actual: Option<u64>) -> ApiError {
        ApiError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl TimelineApi for ReqwestTimelineClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<ApiTweet>, ApiError> {
        let mut url = self.endpoint("api/page")?;
        if page > 1 {
            url.query_pairs_mut().append_pair("n", &page.to_string());
        }
        self.send_for_tweets(Method::GET, url).await
    }

    async fn fetch_since(&self, since: &str) -> Result<Vec<ApiTweet>, ApiError> {
        let mut url = self.endpoint("api/since")?;
        url.query_pairs_mut().append_pair("id", since);
        self.send_for_tweets(Method::GET, url).await
    }

    async fn toggle_favorite(&self, id: &str) -> Result<Vec<ApiTweet>, ApiError> {
        let url = self.tweet_endpoint(id, "/favorite")?;
        self.send_for_tweets(Method::PUT, url).await
    }

    async fn refetch(&self, id: &str) -> Result<RefreshOutcome, ApiError> {
        let url = self.tweet_endpoint(id, "/refresh")?;
        let body = self.send(Method::PUT, url).await?;
        decode_refresh(&body).map_err(map_decode_error)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.tweet_endpoint(id, "")?;
        self.send(Method::DELETE, url).await.map(|_| ())
    }

    async fn trigger_force_reload(&self) -> Result<(), ApiError> {
        let url = self.endpoint("api/force-reload")?;
        self.send(Method::PUT, url).await.map(|_| ())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

fn map_decode_error(err: DecodeError) -> ApiError {
    ApiError::new(FailureKind::Decode, err.to_string())
}
