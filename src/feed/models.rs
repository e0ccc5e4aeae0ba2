//! Review entry model and the field coercions shared by every source.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Display name used when a review has no author.
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Maximum number of characters kept from a submitted review text.
pub const MAX_TEXT_CHARS: usize = 2000;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating, also used when a rating is missing.
pub const MAX_RATING: u8 = 5;

/// One client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier; timestamp-derived for local submissions.
    pub id: String,
    /// Display name of the client.
    pub author: String,
    /// Calendar date (`YYYY-MM-DD`) if known.
    pub date: Option<String>,
    /// Star rating in `[MIN_RATING, MAX_RATING]`.
    pub rating: u8,
    /// Free-form testimonial text.
    pub text: String,
}

impl Review {
    /// Returns the calendar date used for ordering.
    ///
    /// Missing or unparseable dates map to the Unix epoch so they sort last.
    /// RFC 3339 timestamps are reduced to their calendar date.
    #[must_use]
    pub fn calendar_date(&self) -> NaiveDate {
        self.date
            .as_deref()
            .and_then(parse_calendar_date)
            .unwrap_or_default()
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Clamps any integer rating into `[MIN_RATING, MAX_RATING]`.
#[must_use]
pub fn clamp_rating(rating: i64) -> u8 {
    let clamped = rating.clamp(i64::from(MIN_RATING), i64::from(MAX_RATING));
    u8::try_from(clamped).unwrap_or(MAX_RATING)
}

/// Returns at most `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{Review, clamp_rating, truncate_chars};

    fn review_dated(date: Option<&str>) -> Review {
        Review {
            id: "1".to_owned(),
            author: "mina".to_owned(),
            date: date.map(ToOwned::to_owned),
            rating: 5,
            text: "lovely banner".to_owned(),
        }
    }

    #[rstest]
    #[case::below_range(-3, 1)]
    #[case::zero(0, 1)]
    #[case::in_range(3, 3)]
    #[case::above_range(7, 5)]
    #[case::huge(i64::MAX, 5)]
    fn clamp_rating_bounds_values(#[case] input: i64, #[case] expected: u8) {
        assert_eq!(clamp_rating(input), expected);
    }

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        let text = "배너".repeat(3);

        assert_eq!(truncate_chars(&text, 4), "배너배너");
        assert_eq!(truncate_chars("short", 2000), "short");
    }

    #[rstest]
    #[case::plain(Some("2025-03-14"), NaiveDate::from_ymd_opt(2025, 3, 14))]
    #[case::rfc3339(Some("2025-03-14T23:10:00+09:00"), NaiveDate::from_ymd_opt(2025, 3, 14))]
    #[case::missing(None, NaiveDate::from_ymd_opt(1970, 1, 1))]
    #[case::garbage(Some("last tuesday"), NaiveDate::from_ymd_opt(1970, 1, 1))]
    fn calendar_date_parses_or_falls_back_to_epoch(
        #[case] raw: Option<&str>,
        #[case] expected: Option<NaiveDate>,
    ) {
        let expected_date = expected.expect("fixture date should be valid");

        assert_eq!(review_dated(raw).calendar_date(), expected_date);
    }
}
