//! Review listing operation.

use std::io::{self, Write};
use std::sync::Arc;

use reviewfeed::{FeedError, ReviewFeedConfig, ReviewStore};

use super::output::write_review_page;
use super::{ConfiguredStore, build_feed};

/// Loads the feed and prints the configured page.
///
/// # Errors
///
/// Returns [`FeedError::InvalidUrl`] or [`FeedError::Configuration`] when the
/// store settings are unusable, and [`FeedError::Io`] when stdout fails.
pub async fn run(config: &ReviewFeedConfig) -> Result<(), FeedError> {
    let store = ConfiguredStore::from_config(config)?;
    let mut stdout = io::stdout().lock();
    run_with_store(config, Arc::new(store), &mut stdout).await
}

/// Loads the feed from `store` and writes the configured page.
///
/// This function is exposed for testing with stub stores.
pub async fn run_with_store<S, W>(
    config: &ReviewFeedConfig,
    store: Arc<S>,
    writer: &mut W,
) -> Result<(), FeedError>
where
    S: ReviewStore + 'static,
    W: Write,
{
    let mut feed = build_feed(config, store);
    feed.load_initial().await;
    feed.go_to_page(config.page);
    write_review_page(writer, &feed.page())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reviewfeed::ReviewFeedConfig;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::run_with_store;
    use crate::cli::ConfiguredStore;

    fn rows(count: usize) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = (0..count)
            .map(|index| {
                serde_json::json!({
                    "author": format!("client{index}"),
                    "date": format!("2025-01-{:02}", index + 1),
                    "rating": 5,
                    "text": "Lovely work"
                })
            })
            .collect();
        serde_json::json!({ "arr": rows })
    }

    #[tokio::test]
    async fn lists_requested_page_from_remote_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("id", "miya-design"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows(8)))
            .expect(1)
            .mount(&server)
            .await;
        let config = ReviewFeedConfig {
            endpoint: Some(server.uri()),
            page: 2,
            ..Default::default()
        };
        let store = ConfiguredStore::from_config(&config).expect("store should build");

        let mut buffer = Vec::new();
        run_with_store(&config, Arc::new(store), &mut buffer)
            .await
            .expect("listing should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(
            output.contains("Page 2 of 2 (2 reviews shown, 6 per page)"),
            "unexpected page line: {output}"
        );
        assert!(output.contains("client1 (2025-01-02)"), "missing row: {output}");
    }

    #[tokio::test]
    async fn server_error_lists_an_empty_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let config = ReviewFeedConfig {
            endpoint: Some(server.uri()),
            ..Default::default()
        };
        let store = ConfiguredStore::from_config(&config).expect("store should build");

        let mut buffer = Vec::new();
        run_with_store(&config, Arc::new(store), &mut buffer)
            .await
            .expect("fetch failures should not surface");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(output.contains("No reviews yet."), "unexpected output: {output}");
    }

    #[tokio::test]
    async fn offline_blended_listing_shows_seed_reviews() {
        let config = ReviewFeedConfig {
            blend_local: true,
            ..Default::default()
        };
        let store = ConfiguredStore::from_config(&config).expect("store should build");

        let mut buffer = Vec::new();
        run_with_store(&config, Arc::new(store), &mut buffer)
            .await
            .expect("listing should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(output.contains("디스코드 @client3"), "missing seed: {output}");
        assert!(output.contains("Page 1 of 1 (3 reviews shown, 6 per page)"));
    }
}
