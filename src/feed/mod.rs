//! Client review feed.
//!
//! This module keeps the newest-first list of client testimonials in sync
//! with a remote spreadsheet-backed store. It decodes the loosely shaped rows
//! the store returns, inserts local submissions optimistically, reconciles
//! with a delayed re-fetch, and exposes a paginated view. Remote failures are
//! logged and degrade to "no data" so callers never see them.

pub mod cache;
pub mod error;
pub mod form;
pub mod gateway;
pub mod models;
pub mod order;
pub mod pagination;
pub mod reconcile;
pub mod seed;
pub mod synchronizer;
pub mod wire;

pub use cache::LocalReviewCache;
pub use error::FeedError;
pub use form::ReviewForm;
pub use gateway::{HttpReviewStore, OfflineReviewStore, ReviewStore, ReviewStoreConfig};
pub use models::Review;
pub use pagination::{PageInfo, ReviewPage};
pub use synchronizer::{PendingRefresh, ReviewFeed, SyncMode};

#[cfg(test)]
pub use gateway::MockReviewStore;
