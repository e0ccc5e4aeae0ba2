//! Gateway to the remote spreadsheet-backed review store.
//!
//! The trait keeps the synchronizer independent of HTTP so tests can script
//! the store; [`HttpReviewStore`] performs the real requests with `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::error::FeedError;
use super::models::Review;
use super::wire::decode_reviews;

/// Default HTTP timeout for store requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote store that can list and accept reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Fetch every review the store currently holds.
    async fn fetch_reviews(&self) -> Result<Vec<Review>, FeedError>;

    /// Send one review to the store.
    async fn submit_review(&self, review: &Review) -> Result<(), FeedError>;
}

/// Connection settings for [`HttpReviewStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStoreConfig {
    /// Store endpoint; GET lists rows, POST appends one.
    pub endpoint: Url,
    /// Site identifier sent as the `id` parameter.
    pub site_id: String,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl ReviewStoreConfig {
    /// Parses the endpoint and builds a configuration with the default
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] when `endpoint` is not an absolute
    /// URL.
    pub fn new(endpoint: &str, site_id: impl Into<String>) -> Result<Self, FeedError> {
        let parsed =
            Url::parse(endpoint).map_err(|error| FeedError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            endpoint: parsed,
            site_id: site_id.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Overrides the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP implementation of [`ReviewStore`].
#[derive(Debug, Clone)]
pub struct HttpReviewStore {
    config: ReviewStoreConfig,
    client: Client,
}

impl HttpReviewStore {
    /// Creates a store client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(config: ReviewStoreConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| FeedError::Configuration {
                message: format!("failed to configure review store HTTP client: {error}"),
            })?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ReviewStore for HttpReviewStore {
    async fn fetch_reviews(&self) -> Result<Vec<Review>, FeedError> {
        let response = self
            .client
            .get(self.config.endpoint.clone())
            .query(&[("id", self.config.site_id.as_str())])
            .send()
            .await
            .map_err(|error| FeedError::Network {
                message: format!("review fetch transport failed: {error}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(&content, 160),
            );
            return Err(FeedError::Api {
                message: format!("review fetch failed with status {}: {body}", status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|error| FeedError::Network {
            message: format!("review fetch body could not be read: {error}"),
        })?;
        Ok(decode_reviews(&body))
    }

    async fn submit_review(&self, review: &Review) -> Result<(), FeedError> {
        let rating = review.rating.to_string();
        let form = [
            ("id", self.config.site_id.as_str()),
            ("author", review.author.as_str()),
            ("rating", rating.as_str()),
            ("text", review.text.as_str()),
        ];

        let response = self
            .client
            .post(self.config.endpoint.clone())
            .form(&form)
            .send()
            .await
            .map_err(|error| FeedError::Network {
                message: format!("review submit transport failed: {error}"),
            })?;

        tracing::debug!(
            status = response.status().as_u16(),
            review_id = %review.id,
            "review store accepted submission request"
        );
        Ok(())
    }
}

/// Store used when no remote endpoint is configured.
///
/// Fetches always return no rows and submissions are dropped, so the feed
/// shows only local data.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineReviewStore;

#[async_trait]
impl ReviewStore for OfflineReviewStore {
    async fn fetch_reviews(&self) -> Result<Vec<Review>, FeedError> {
        Ok(Vec::new())
    }

    async fn submit_review(&self, review: &Review) -> Result<(), FeedError> {
        tracing::debug!(review_id = %review.id, "no review store configured; keeping review local");
        Ok(())
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
