// src/services/article_client.rs
// DOCUMENTATION: News lookup client
// PURPOSE: Fetch local news articles for a location from the external provider

use crate::errors::ServiceError;
use crate::models::Article;
use crate::services::ArticleCache;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Source of news articles for a location
/// DOCUMENTATION: The query service only depends on this seam, so the
/// provider can be swapped (or faked in tests) without touching validation
#[async_trait]
pub trait ArticleLookup: Send + Sync {
    async fn lookup(&self, geo: &str) -> Result<Vec<Article>, ServiceError>;
}

/// HTTP client for the news provider
/// DOCUMENTATION: `GET {base_url}?geo=...` must answer with a JSON array of articles
pub struct NewsClient {
    /// HTTP client for making requests
    client: Client,
    /// Provider endpoint
    base_url: String,
    /// Generic feed served when the provider has nothing for a location
    fallback_url: Option<String>,
    /// Shared lookup cache
    cache: Arc<ArticleCache>,
}

impl NewsClient {
    /// Create new news client
    /// DOCUMENTATION: `timeout` bounds each provider request end to end
    pub fn new(
        base_url: String,
        fallback_url: Option<String>,
        timeout: Duration,
        cache: Arc<ArticleCache>,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            log::error!("Failed to create HTTP client: {}", e);
            ServiceError::ExternalApiError("HTTP client unavailable".to_string())
        })?;

        Ok(Self {
            client,
            base_url,
            fallback_url,
            cache,
        })
    }

    async fn fetch(&self, url: &str, geo: Option<&str>) -> Result<Vec<Article>, ServiceError> {
        let mut request = self.client.get(url);
        if let Some(geo) = geo {
            request = request.query(&[("geo", geo)]);
        }

        // Details stay in the log; the message reaches the browser
        let response = request.send().await.map_err(|e| {
            log::error!("News lookup request to {} failed: {}", url, e);
            if e.is_timeout() {
                ServiceError::ExternalApiError("Request timed out".to_string())
            } else {
                ServiceError::ExternalApiError("Request failed".to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("News lookup error {} from {}: {}", status, url, body);
            return Err(ServiceError::ExternalApiError(format!("API error {}", status)));
        }

        response.json::<Vec<Article>>().await.map_err(|e| {
            log::error!("Failed to parse news lookup response from {}: {}", url, e);
            if e.is_timeout() {
                ServiceError::ExternalApiError("Request timed out".to_string())
            } else {
                ServiceError::ExternalApiError("Response is not a JSON array".to_string())
            }
        })
    }
}

#[async_trait]
impl ArticleLookup for NewsClient {
    async fn lookup(&self, geo: &str) -> Result<Vec<Article>, ServiceError> {
        if let Some(cached) = self.cache.get(geo).await {
            return Ok(cached);
        }

        log::debug!("News lookup: geo={}", geo);
        let mut articles = self.fetch(&self.base_url, Some(geo)).await?;

        if articles.is_empty() {
            if let Some(fallback) = &self.fallback_url {
                log::info!("No local news for {}, using fallback feed", geo);
                articles = self.fetch(fallback, None).await?;
            }
        }

        log::info!("News lookup for {} returned {} articles", geo, articles.len());
        log::debug!(
            "Top headline for {}: {:?}",
            geo,
            articles.first().and_then(Article::title)
        );
        self.cache.set(geo.to_string(), articles.clone()).await;
        Ok(articles)
    }
}
