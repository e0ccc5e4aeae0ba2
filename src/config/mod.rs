//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.reviewfeed.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REVIEWFEED_ENDPOINT`, `REVIEWFEED_SITE_ID`,
//!    and so on
//! 4. **Command-line arguments** – `--endpoint`/`-e`, `--page`/`-p`, ...
//!
//! # Configuration File
//!
//! ```toml
//! endpoint = "https://script.google.com/macros/s/example/exec"
//! site_id = "miya-design"
//! page_size = 6
//! blend_local = true
//! cache_path = "reviews.json"
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::feed::gateway::DEFAULT_TIMEOUT;
use crate::feed::pagination::DEFAULT_PAGE_SIZE;
use crate::feed::synchronizer::DEFAULT_REFETCH_DELAY;
use crate::feed::{FeedError, LocalReviewCache, ReviewForm, ReviewStoreConfig, SyncMode};
use crate::site::ContactLinks;

/// Site identifier sent to the review store when none is configured.
pub const DEFAULT_SITE_ID: &str = "miya-design";

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Print one page of reviews.
    ListReviews,
    /// Submit a review and print the reconciled feed.
    SubmitReview,
    /// Print the service catalogue and contact channels.
    ShowContacts,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use reviewfeed::ReviewFeedConfig;
///
/// let config = ReviewFeedConfig::load().expect("failed to load configuration");
/// let store = config.store_config().expect("endpoint should be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REVIEWFEED",
    discovery(
        dotfile_name = ".reviewfeed.toml",
        config_file_name = "reviewfeed.toml",
        app_name = "reviewfeed"
    )
)]
pub struct ReviewFeedConfig {
    /// Review store endpoint. Without one the feed runs offline.
    ///
    /// Can be provided via:
    /// - CLI: `--endpoint <URL>` or `-e <URL>`
    /// - Environment: `REVIEWFEED_ENDPOINT`
    /// - Config file: `endpoint = "..."`
    #[ortho_config(cli_short = 'e')]
    pub endpoint: Option<String>,

    /// Site identifier sent as the `id` parameter.
    #[ortho_config(cli_short = 's')]
    pub site_id: String,

    /// Page of reviews to print (1-based, clamped).
    #[ortho_config(cli_short = 'p')]
    pub page: usize,

    /// Reviews per page.
    #[ortho_config()]
    pub page_size: usize,

    /// Display name of the review to submit.
    #[ortho_config(cli_short = 'a')]
    pub author: Option<String>,

    /// Star rating of the review to submit; clamped to 1..=5.
    #[ortho_config(cli_short = 'r')]
    pub rating: i64,

    /// Text of the review to submit. Selects submit mode when present.
    #[ortho_config(cli_short = 't')]
    pub text: Option<String>,

    /// Merges remote rows with the local cache instead of replacing.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so use the CLI flag or the config file.
    #[ortho_config(cli_short = 'b')]
    pub blend_local: bool,

    /// Local cache file used in blended mode.
    #[ortho_config()]
    pub cache_path: Option<String>,

    /// Delay before the reconciling re-fetch, in milliseconds.
    #[ortho_config()]
    pub refetch_delay_ms: u64,

    /// HTTP timeout for store requests, in seconds.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Prints the service catalogue and contact channels.
    ///
    /// Can be provided via:
    /// - CLI: `--contacts` or `-k`
    /// - Config file: `contacts = true`
    #[ortho_config(cli_short = 'k')]
    pub contacts: bool,

    /// Emits telemetry events as JSON lines on stderr.
    #[ortho_config()]
    pub telemetry: bool,

    /// Overrides the chat-app deep link.
    #[ortho_config()]
    pub chat_url: Option<String>,

    /// Overrides the community-server invite link.
    #[ortho_config()]
    pub community_url: Option<String>,

    /// Overrides the phone number.
    #[ortho_config()]
    pub phone: Option<String>,

    /// Overrides the enquiry e-mail address.
    #[ortho_config()]
    pub email: Option<String>,
}

impl Default for ReviewFeedConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            site_id: DEFAULT_SITE_ID.to_owned(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            author: None,
            rating: 5,
            text: None,
            blend_local: false,
            cache_path: None,
            refetch_delay_ms: u64::try_from(DEFAULT_REFETCH_DELAY.as_millis())
                .unwrap_or(u64::MAX),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
            contacts: false,
            telemetry: false,
            chat_url: None,
            community_url: None,
            phone: None,
            email: None,
        }
    }
}

impl ReviewFeedConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// Returns `ShowContacts` when `contacts` is set, `SubmitReview` when a
    /// review text is provided, or `ListReviews` otherwise.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.contacts {
            OperationMode::ShowContacts
        } else if self.text.is_some() {
            OperationMode::SubmitReview
        } else {
            OperationMode::ListReviews
        }
    }

    /// Builds the store settings, or `None` when no endpoint is configured.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] when the endpoint does not parse and
    /// [`FeedError::Configuration`] when the site id is blank.
    pub fn store_config(&self) -> Result<Option<ReviewStoreConfig>, FeedError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Ok(None);
        };
        let site_id = self.site_id.trim();
        if site_id.is_empty() {
            return Err(FeedError::Configuration {
                message: "site id must not be empty (use --site-id or -s)".to_owned(),
            });
        }

        let config = ReviewStoreConfig::new(endpoint, site_id)?
            .with_timeout(Duration::from_secs(self.timeout_seconds));
        Ok(Some(config))
    }

    /// Returns the sync mode selected by `blend_local`.
    #[must_use]
    pub const fn sync_mode(&self) -> SyncMode {
        if self.blend_local {
            SyncMode::Blended
        } else {
            SyncMode::Authoritative
        }
    }

    /// Returns the local cache when a cache path is configured.
    #[must_use]
    pub fn review_cache(&self) -> Option<LocalReviewCache> {
        self.cache_path.as_deref().map(LocalReviewCache::new)
    }

    /// Returns the delay before the reconciling re-fetch.
    #[must_use]
    pub const fn refetch_delay(&self) -> Duration {
        Duration::from_millis(self.refetch_delay_ms)
    }

    /// Builds the submission form from the configured review fields.
    #[must_use]
    pub fn review_form(&self) -> ReviewForm {
        ReviewForm::new(
            self.author.clone().unwrap_or_default(),
            self.rating,
            self.text.clone().unwrap_or_default(),
        )
    }

    /// Returns the contact links, falling back to the built-in ones.
    #[must_use]
    pub fn contact_links(&self) -> ContactLinks {
        let defaults = ContactLinks::default();
        ContactLinks {
            email: self.email.clone().unwrap_or(defaults.email),
            chat_url: self.chat_url.clone().unwrap_or(defaults.chat_url),
            community_url: self.community_url.clone().unwrap_or(defaults.community_url),
            phone: self.phone.clone().unwrap_or(defaults.phone),
        }
    }
}
