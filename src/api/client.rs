//! REST client for the news backend.
//!
//! # Security Note - Logging
//!
//! The optional API token is kept in a `SecretString` and the Authorization
//! header is marked sensitive, so it is redacted from reqwest's debug output.

use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{NewsdeskError, Result};
use crate::query::{NewsFilter, PageDescriptor, Query};
use crate::types::{CreateNews, CreatePublisher, ItemId, NewsItem, Page, Publisher};

use super::{ApiError, Envelope, NewsBackend};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP implementation of [`NewsBackend`]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpBackend {
    /// Create a backend from configuration (URL, timeout and token)
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut backend = Self::with_timeout(&config.api_url(), config.request_timeout())?;
        backend.token = config.token().map(SecretString::from);
        Ok(backend)
    }

    /// Create a backend for the given base URL with the default 30s timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| NewsdeskError::Config(format!("invalid endpoint '{path}': {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let Some(token) = &self.token else {
            return Ok(request);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| NewsdeskError::Config("API token contains invalid characters".into()))?;
        value.set_sensitive(true);
        Ok(request.header(header::AUTHORIZATION, value))
    }

    /// Send a request and decode the success envelope, turning non-2xx
    /// answers into [`ApiError`]
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>> {
        let response = self.authorize(request)?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_body(status.as_u16(), &body).into());
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Envelope {
                data: None,
                pagination: None,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<Page<T>> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {url} {params:?}");
        let envelope: Envelope<Vec<T>> = self.send(self.client.get(url).query(&params)).await?;
        Ok(envelope.into_page())
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {url}");
        let envelope: Envelope<T> = self.send(self.client.get(url)).await?;
        envelope
            .data
            .ok_or_else(|| NewsdeskError::Other(format!("empty response from {path}")))
    }

    async fn post<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {url}");
        let envelope: Envelope<T> = self.send(self.client.post(url).json(body)).await?;
        envelope
            .data
            .ok_or_else(|| NewsdeskError::Other(format!("empty response from {path}")))
    }
}

/// Parse the configured base URL, making sure relative joins keep its path
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| NewsdeskError::Config(format!("invalid api_url '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(NewsdeskError::Config(format!(
            "api_url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl NewsBackend for HttpBackend {
    async fn suggestions(&self, query: &Query) -> Result<Vec<String>> {
        let url = self.endpoint("news/search/suggestions")?;
        tracing::debug!("GET {url} {:?}", query.tokens());
        let envelope: Envelope<Vec<String>> = self
            .send(self.client.get(url).query(&query.to_params()))
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn search_news(&self, query: &Query, page: PageDescriptor) -> Result<Page<NewsItem>> {
        let mut params = query.to_params();
        params.extend(page.to_params());
        self.get_page("news/search", params).await
    }

    async fn list_news(&self, filter: &NewsFilter, page: PageDescriptor) -> Result<Page<NewsItem>> {
        let mut params = filter.to_params();
        params.extend(page.to_params());
        self.get_page("news", params).await
    }

    async fn get_news(&self, id: &ItemId) -> Result<NewsItem> {
        self.get_one(&format!("news/{id}")).await
    }

    async fn create_news(&self, request: &CreateNews) -> Result<NewsItem> {
        self.post("news", request).await
    }

    async fn delete_news(&self, id: &ItemId) -> Result<()> {
        let url = self.endpoint(&format!("news/{id}"))?;
        tracing::debug!("DELETE {url}");
        let _: Envelope<serde_json::Value> = self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn list_publishers(&self, page: PageDescriptor) -> Result<Page<Publisher>> {
        self.get_page("publishers", page.to_params()).await
    }

    async fn create_publisher(&self, request: &CreatePublisher) -> Result<Publisher> {
        self.post("publishers", request).await
    }
}
