//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`contacts`]: Print the service catalogue and contact channels
//! - [`list_reviews`]: Print one page of the review feed
//! - [`submit_review`]: Submit a review and print the reconciled feed
//!
//! Output formatting utilities are in [`output`].

use std::sync::Arc;

use async_trait::async_trait;
use reviewfeed::telemetry::StderrJsonlTelemetrySink;
use reviewfeed::{
    FeedError, HttpReviewStore, OfflineReviewStore, Review, ReviewFeed, ReviewFeedConfig,
    ReviewStore,
};

pub mod contacts;
pub mod list_reviews;
pub mod output;
pub mod submit_review;

/// Review store selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    /// Remote store reached over HTTP.
    Remote(HttpReviewStore),
    /// No endpoint configured; the feed shows local data only.
    Offline(OfflineReviewStore),
}

impl ConfiguredStore {
    /// Builds the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] or [`FeedError::Configuration`] when
    /// the endpoint settings are unusable.
    pub fn from_config(config: &ReviewFeedConfig) -> Result<Self, FeedError> {
        match config.store_config()? {
            Some(store_config) => Ok(Self::Remote(HttpReviewStore::new(store_config)?)),
            None => Ok(Self::Offline(OfflineReviewStore)),
        }
    }
}

#[async_trait]
impl ReviewStore for ConfiguredStore {
    async fn fetch_reviews(&self) -> Result<Vec<Review>, FeedError> {
        match self {
            Self::Remote(store) => store.fetch_reviews().await,
            Self::Offline(store) => store.fetch_reviews().await,
        }
    }

    async fn submit_review(&self, review: &Review) -> Result<(), FeedError> {
        match self {
            Self::Remote(store) => store.submit_review(review).await,
            Self::Offline(store) => store.submit_review(review).await,
        }
    }
}

/// Builds a feed over `store` with the configured mode, paging and cache.
pub fn build_feed<S: ReviewStore + 'static>(
    config: &ReviewFeedConfig,
    store: Arc<S>,
) -> ReviewFeed<S> {
    let mut feed = ReviewFeed::new(store)
        .with_mode(config.sync_mode())
        .with_page_size(config.page_size)
        .with_refetch_delay(config.refetch_delay());
    if let Some(cache) = config.review_cache() {
        feed = feed.with_cache(cache);
    }
    if config.telemetry {
        feed = feed.with_telemetry(Arc::new(StderrJsonlTelemetrySink));
    }
    feed
}
