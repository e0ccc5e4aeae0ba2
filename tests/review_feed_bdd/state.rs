//! Scenario state for review feed BDD tests.

use std::time::Duration;

use reviewfeed::{HttpReviewStore, PendingRefresh, ReviewFeed, ReviewStoreConfig};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::{Value, json};
use wiremock::MockServer;

use crate::support::runtime::SharedRuntime;

/// Site identifier used by every scenario.
pub(crate) const SITE_ID: &str = "miya-design";

/// State shared across steps in a review feed scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct FeedState {
    /// Runtime driving the store calls.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Mock review store.
    pub(crate) server: Slot<MockServer>,
    /// Feed under test.
    pub(crate) feed: Slot<ReviewFeed<HttpReviewStore>>,
    /// Re-fetch scheduled by the last accepted submission.
    pub(crate) pending: Slot<PendingRefresh>,
    /// Whether the last submission attempt was accepted.
    pub(crate) accepted: Slot<bool>,
}

/// Builds a store client pointed at the mock server.
///
/// # Panics
///
/// Panics if the mock server URI does not parse.
pub(crate) fn store_for(server: &MockServer) -> HttpReviewStore {
    let config = ReviewStoreConfig::new(&server.uri(), SITE_ID)
        .unwrap_or_else(|error| panic!("mock server URI should parse: {error}"))
        .with_timeout(Duration::from_secs(2));
    HttpReviewStore::new(config)
        .unwrap_or_else(|error| panic!("store client should build: {error}"))
}

/// Returns `count` spreadsheet rows in the `rows` envelope, oldest first.
pub(crate) fn rows_body(count: usize) -> Value {
    let rows: Vec<Value> = (0..count)
        .map(|index| {
            json!({
                "author": format!("client{index}"),
                "date": format!("2024-03-{:02}", index + 1),
                "rating": 5,
                "text": format!("Commission {index} was lovely")
            })
        })
        .collect();
    json!({ "rows": rows })
}
