//! Review submission form state and draft validation.

use chrono::{DateTime, TimeZone};

use super::models::{MAX_RATING, MAX_TEXT_CHARS, Review, clamp_rating, truncate_chars};

/// Texts must be longer than this many characters (after trimming).
pub const MIN_TEXT_CHARS: usize = 5;

/// Input fields of the review submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    /// Client display name.
    pub author: String,
    /// Requested star rating; clamped on submission.
    pub rating: i64,
    /// Testimonial text.
    pub text: String,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            author: String::new(),
            rating: i64::from(MAX_RATING),
            text: String::new(),
        }
    }
}

impl ReviewForm {
    /// Creates a form pre-filled with the given values.
    #[must_use]
    pub fn new(author: impl Into<String>, rating: i64, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            rating,
            text: text.into(),
        }
    }

    /// Returns true when the submit action should be enabled.
    ///
    /// The author must be non-blank and the trimmed text longer than
    /// [`MIN_TEXT_CHARS`] characters.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.author.trim().is_empty() && self.text.trim().chars().count() > MIN_TEXT_CHARS
    }

    /// Resets every field to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Builds the review this form would submit at `now`.
    ///
    /// Returns `None` when [`can_submit`](Self::can_submit) is false. The id
    /// is the millisecond timestamp of `now`, the date is its calendar day,
    /// the rating is clamped and the text truncated to [`MAX_TEXT_CHARS`].
    #[must_use]
    pub fn to_review<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<Review> {
        if !self.can_submit() {
            return None;
        }

        Some(Review {
            id: now.timestamp_millis().to_string(),
            author: self.author.trim().to_owned(),
            date: Some(now.date_naive().format("%Y-%m-%d").to_string()),
            rating: clamp_rating(self.rating),
            text: truncate_chars(self.text.trim(), MAX_TEXT_CHARS),
        })
    }
}
