//! Service catalogue and contact channel listing.

use std::io::{self, Write};

use reviewfeed::site::{categories, faq, process_steps, services};
use reviewfeed::{FeedError, ReviewFeedConfig};

use super::output::{write_catalogue, write_channels, write_faq};

/// Prints the site catalogue, FAQ and contact channels.
///
/// # Errors
///
/// Returns [`FeedError::InvalidUrl`] when a configured link is invalid and
/// [`FeedError::Io`] when stdout fails.
pub fn run(config: &ReviewFeedConfig) -> Result<(), FeedError> {
    let mut stdout = io::stdout().lock();
    run_to(config, &mut stdout)
}

/// Writes the catalogue and channels to `writer`.
pub fn run_to<W: Write>(config: &ReviewFeedConfig, writer: &mut W) -> Result<(), FeedError> {
    let channels = config.contact_links().channels()?;
    write_catalogue(writer, categories(), services(), process_steps())?;
    write_faq(writer, faq())?;
    write_channels(writer, &channels)
}
