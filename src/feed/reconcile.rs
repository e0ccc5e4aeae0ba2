//! Pure reconciliation between the local list and remote rows.
//!
//! Nothing in this module performs I/O; the synchronizer fetches the remote
//! rows and hands them in, which keeps the merge rules independently testable.

use std::collections::HashMap;

use super::models::Review;
use super::order::sort_newest_first;

/// Separator placed between author and text when building a merge key.
const SIGNATURE_SEPARATOR: char = '\u{1f}';

/// Builds the de-duplication key for a review: author plus text.
#[must_use]
pub fn signature(review: &Review) -> String {
    let mut key = String::with_capacity(review.author.len() + review.text.len() + 1);
    key.push_str(&review.author);
    key.push(SIGNATURE_SEPARATOR);
    key.push_str(&review.text);
    key
}

/// Merges fetched rows with local entries keyed by [`signature`].
///
/// Fetched entries are inserted first and local entries second, so a local
/// entry overwrites a fetched one with the same author and text. The
/// surviving entry keeps the position of the first occurrence. The result is
/// not re-sorted.
///
/// # Examples
///
/// ```
/// use reviewfeed::feed::models::Review;
/// use reviewfeed::feed::reconcile::merge_remote;
///
/// let fetched = vec![Review {
///     id: "0-2025-01-01-A".into(),
///     author: "A".into(),
///     date: Some("2025-01-01".into()),
///     rating: 5,
///     text: "X".into(),
/// }];
/// let local = vec![Review { rating: 1, id: "local".into(), ..fetched[0].clone() }];
///
/// let merged = merge_remote(fetched, local);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].rating, 1);
/// ```
#[must_use]
pub fn merge_remote(fetched: Vec<Review>, local: Vec<Review>) -> Vec<Review> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Review> = Vec::with_capacity(fetched.len() + local.len());

    for review in fetched.into_iter().chain(local) {
        let key = signature(&review);
        match positions.get(&key).and_then(|&index| merged.get_mut(index)) {
            Some(slot) => *slot = review,
            None => {
                positions.insert(key, merged.len());
                merged.push(review);
            }
        }
    }

    merged
}

/// Result of reconciling the local list with a remote snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The list to display, newest first.
    pub reviews: Vec<Review>,
    /// True when the remote snapshot replaced the local list.
    pub replaced: bool,
}

/// Chooses between a remote snapshot and the local list.
///
/// A non-empty remote snapshot is authoritative and replaces the local list;
/// an empty one (no data, or a failed fetch) leaves the local list as is.
#[must_use]
pub fn reconcile(remote: Vec<Review>, local: Vec<Review>) -> ReconcileOutcome {
    if remote.is_empty() {
        return ReconcileOutcome {
            reviews: local,
            replaced: false,
        };
    }

    let mut reviews = remote;
    sort_newest_first(&mut reviews);
    ReconcileOutcome {
        reviews,
        replaced: true,
    }
}

/// Merges remote rows into the local list and sorts the result.
///
/// Used by the blended sync mode, where local entries survive alongside
/// remote ones instead of being replaced.
#[must_use]
pub fn blend(remote: Vec<Review>, local: Vec<Review>) -> Vec<Review> {
    let mut reviews = merge_remote(remote, local);
    sort_newest_first(&mut reviews);
    reviews
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{blend, merge_remote, reconcile, signature};
    use crate::feed::models::Review;

    fn review(id: &str, author: &str, text: &str, rating: u8) -> Review {
        Review {
            id: id.to_owned(),
            author: author.to_owned(),
            date: Some("2025-06-01".to_owned()),
            rating,
            text: text.to_owned(),
        }
    }

    #[fixture]
    fn local_list() -> Vec<Review> {
        vec![review("1750000000000", "Jane", "Great work, thanks!", 5)]
    }

    #[test]
    fn signature_separates_author_from_text() {
        let joined = review("1", "ab", "c", 5);
        let split = review("2", "a", "bc", 5);

        assert_ne!(signature(&joined), signature(&split));
    }

    #[test]
    fn local_copy_wins_on_signature_collision() {
        let fetched = vec![review("0-remote", "A", "X", 5)];
        let local = vec![review("local", "A", "X", 1)];

        let merged = merge_remote(fetched, local);

        assert_eq!(merged.len(), 1);
        let survivor = merged.first().expect("one entry should survive");
        assert_eq!(survivor.rating, 1);
        assert_eq!(survivor.id, "local");
    }

    #[test]
    fn merge_keeps_first_occurrence_position() {
        let fetched = vec![
            review("r0", "A", "first", 5),
            review("r1", "B", "second", 5),
        ];
        let local = vec![review("l0", "C", "third", 4), review("l1", "A", "first", 2)];

        let merged = merge_remote(fetched, local);
        let ids: Vec<&str> = merged.iter().map(|entry| entry.id.as_str()).collect();

        assert_eq!(ids, vec!["l1", "r1", "l0"]);
    }

    #[test]
    fn duplicate_fetched_rows_collapse_to_the_last() {
        let fetched = vec![review("r0", "A", "X", 3), review("r1", "A", "X", 4)];

        let merged = merge_remote(fetched, Vec::new());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.first().map(|entry| entry.rating), Some(4));
    }

    #[rstest]
    fn empty_remote_keeps_local_list(local_list: Vec<Review>) {
        let outcome = reconcile(Vec::new(), local_list.clone());

        assert!(!outcome.replaced);
        assert_eq!(outcome.reviews, local_list);
    }

    #[rstest]
    fn non_empty_remote_replaces_and_sorts(local_list: Vec<Review>) {
        let mut older = review("0-old", "Bo", "nice poster work", 4);
        older.date = Some("2024-01-01".to_owned());
        let newer = review("1-new", "Cy", "clean logo, fast", 5);

        let outcome = reconcile(vec![older, newer], local_list);

        assert!(outcome.replaced);
        let ids: Vec<&str> = outcome.reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1-new", "0-old"]);
    }

    #[rstest]
    fn blend_sorts_the_merged_list(local_list: Vec<Review>) {
        let mut old_remote = review("0-old", "Bo", "nice poster work", 4);
        old_remote.date = Some("2023-02-02".to_owned());

        let blended = blend(vec![old_remote], local_list);
        let ids: Vec<&str> = blended.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["1750000000000", "0-old"]);
    }
}
