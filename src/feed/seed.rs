//! Built-in sample testimonials shown before any real review exists.

use super::models::Review;

const SEED_TEXT: &str =
    "빠르게 소통해 주시고 결과물도 정말 예뻤어요. 다음에도 의뢰하고 싶어요!";

/// Returns the static seed reviews, newest first.
#[must_use]
pub fn seed_reviews() -> Vec<Review> {
    (1..=3)
        .rev()
        .map(|index| Review {
            id: format!("seed-{index}"),
            author: format!("디스코드 @client{index}"),
            date: None,
            rating: 5,
            text: SEED_TEXT.to_owned(),
        })
        .collect()
}
