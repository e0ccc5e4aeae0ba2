//! Reviewfeed library crate backing a design-commission portfolio site.
//!
//! The library keeps the site's client review feed in sync with a remote
//! spreadsheet-backed store: it decodes the store's loosely shaped rows,
//! inserts submissions optimistically, reconciles with a delayed re-fetch,
//! and paginates the newest-first list. It also carries the site's static
//! service catalogue and contact channels.

pub mod config;
pub mod feed;
pub mod site;
pub mod telemetry;

pub use config::{OperationMode, ReviewFeedConfig};
pub use feed::{
    FeedError, HttpReviewStore, LocalReviewCache, OfflineReviewStore, PageInfo, PendingRefresh,
    Review, ReviewFeed, ReviewForm, ReviewPage, ReviewStore, ReviewStoreConfig, SyncMode,
};
