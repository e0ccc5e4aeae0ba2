//! Review submission operation.

use std::io::{self, Write};
use std::sync::Arc;

use reviewfeed::feed::form::MIN_TEXT_CHARS;
use reviewfeed::{FeedError, ReviewFeedConfig, ReviewStore};

use super::output::{io_error, write_review_page};
use super::{ConfiguredStore, build_feed};

/// Submits the configured review and prints the feed before and after the
/// reconciling re-fetch.
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

/// Submits the configured review through `store`.
///
/// A draft that fails validation is reported and leaves the feed unchanged;
/// it is not an error. This function is exposed for testing with stub
/// stores.
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

    let mut form = config.review_form();
    let Some(pending) = feed.submit(&mut form) else {
        writeln!(
            writer,
            "Review not submitted: a name and more than {MIN_TEXT_CHARS} characters of text are required."
        )
        .map_err(|e| io_error(&e))?;
        return Ok(());
    };

    writeln!(writer, "Submitted review {}.", pending.review_id()).map_err(|e| io_error(&e))?;
    write_review_page(writer, &feed.page())?;

    let replaced = feed.settle(pending).await;
    let notice = if replaced {
        "Feed refreshed from the review store."
    } else {
        "Review store returned no rows; showing the local feed."
    };
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "{notice}").map_err(|e| io_error(&e))?;
    write_review_page(writer, &feed.page())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reviewfeed::ReviewFeedConfig;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::run_with_store;
    use crate::cli::ConfiguredStore;

    fn submit_config(endpoint: Option<String>, text: &str) -> ReviewFeedConfig {
        ReviewFeedConfig {
            endpoint,
            author: Some("Jane".to_owned()),
            rating: 7,
            text: Some(text.to_owned()),
            refetch_delay_ms: 10,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn submission_posts_review_and_prints_reconciled_feed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("author=Jane"))
            .and(body_string_contains("rating=5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "rows": [
                    {"author": "Jane", "date": "2025-08-15", "rating": 5, "text": "Great work, thanks!"}
                ]
            })))
            .mount(&server)
            .await;
        let config = submit_config(Some(server.uri()), "Great work, thanks!");
        let store = ConfiguredStore::from_config(&config).expect("store should build");

        let mut buffer = Vec::new();
        run_with_store(&config, Arc::new(store), &mut buffer)
            .await
            .expect("submission should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(output.contains("Submitted review"), "missing notice: {output}");
        assert!(
            output.contains("Feed refreshed from the review store."),
            "expected reconciliation: {output}"
        );
        assert!(output.contains("★★★★★ Jane"), "missing review: {output}");
    }

    #[tokio::test]
    async fn rejected_draft_is_reported_without_error() {
        let config = submit_config(None, "nice");
        let store = ConfiguredStore::from_config(&config).expect("store should build");

        let mut buffer = Vec::new();
        run_with_store(&config, Arc::new(store), &mut buffer)
            .await
            .expect("rejected draft is not an error");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(
            output.contains("Review not submitted"),
            "missing rejection notice: {output}"
        );
        assert!(!output.contains("Page"), "no feed should be printed: {output}");
    }

    #[tokio::test]
    async fn offline_submission_keeps_the_local_copy() {
        let config = submit_config(None, "Great work, thanks!");
        let store = ConfiguredStore::from_config(&config).expect("store should build");

        let mut buffer = Vec::new();
        run_with_store(&config, Arc::new(store), &mut buffer)
            .await
            .expect("offline submission should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(output.contains("showing the local feed"), "unexpected: {output}");
        assert_eq!(output.matches("Jane").count(), 2, "printed before and after");
    }
}
