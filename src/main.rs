//! Reviewfeed CLI entrypoint for the site's review feed.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use reviewfeed::{FeedError, OperationMode, ReviewFeedConfig};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), FeedError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::ListReviews => cli::list_reviews::run(&config).await,
        OperationMode::SubmitReview => cli::submit_review::run(&config).await,
        OperationMode::ShowContacts => cli::contacts::run(&config),
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `warn`
/// default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`FeedError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ReviewFeedConfig, FeedError> {
    ReviewFeedConfig::load().map_err(|error| FeedError::Configuration {
        message: error.to_string(),
    })
}
