//! Newest-first ordering for review lists.
//!
//! Reviews sort by calendar date descending; entries on the same date are
//! tie-broken by descending `id` string comparison. Undated reviews count as
//! the Unix epoch and therefore sink to the end.

use std::cmp::Ordering;

use super::models::Review;

/// Compares two reviews so that the newer one orders first.
#[must_use]
pub fn compare_newest_first(left: &Review, right: &Review) -> Ordering {
    right
        .calendar_date()
        .cmp(&left.calendar_date())
        .then_with(|| right.id.cmp(&left.id))
}

/// Sorts reviews in place, newest first.
pub fn sort_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(compare_newest_first);
}

/// Returns true when `reviews` already satisfies the newest-first order.
#[must_use]
pub fn is_newest_first(reviews: &[Review]) -> bool {
    reviews
        .windows(2)
        .all(|pair| match pair {
            [earlier, later] => compare_newest_first(earlier, later) != Ordering::Greater,
            _ => true,
        })
}
