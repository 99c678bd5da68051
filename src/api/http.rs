//! HTTP client for the chat backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{ChatBackend, ChatExchange, ChatReply, ChatRequest, HealthReport};
use crate::config::BackendConfig;
use crate::error::Result;

/// `reqwest`-backed [`ChatBackend`].
///
/// # Example
///
/// ```rust,no_run
/// use chat_widget::api::{ChatBackend, HttpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:5000")?;
/// let report = backend.health().await?;
/// println!("backend says {}", report.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    health_path: String,
    chat_path: String,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a client with the default `/health` and `/chat` paths.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            health_path: "/health".to_string(),
            chat_path: "/chat".to_string(),
            http,
        })
    }

    /// Build a client from configuration, applying the optional request timeout.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let mut backend = Self::with_client(&config.base_url, builder.build()?)?;
        backend.health_path.clone_from(&config.health_path);
        backend.chat_path.clone_from(&config.chat_path);
        Ok(backend)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn health(&self) -> Result<HealthReport> {
        let response = self.http.get(self.url(&self.health_path)?).send().await?;
        debug!(
            name: "backend.health.response",
            status = response.status().as_u16(),
            "Health response received"
        );
        // The body is classified whatever the status code says.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatExchange> {
        let response = self
            .http
            .post(self.url(&self.chat_path)?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(
            name: "backend.chat.response",
            status = status.as_u16(),
            "Chat response received"
        );

        let body = response.bytes().await?;
        let reply: ChatReply = serde_json::from_slice(&body)?;
        Ok(ChatExchange {
            http_status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            reply,
        })
    }
}
