//! Decoding of remote review-store payloads.
//!
//! The store answers with one of several JSON shapes, checked in order:
//! an object with a `rows` array, an object with an `arr` array, an object
//! whose array sits under the Korean word for "row" (`행`, left behind by a
//! translated sheet script), or a bare array. Anything else decodes to an
//! empty list. Individual rows are coerced to safe defaults rather than
//! rejected.

use serde::Deserialize;
use serde_json::Value;

use super::models::{ANONYMOUS_AUTHOR, MAX_RATING, Review, clamp_rating};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowsEnvelope {
    Rows {
        rows: Vec<Value>,
    },
    Arr {
        arr: Vec<Value>,
    },
    Localised {
        #[serde(rename = "행")]
        rows: Vec<Value>,
    },
    Bare(Vec<Value>),
}

impl RowsEnvelope {
    fn into_rows(self) -> Vec<Value> {
        match self {
            Self::Rows { rows } | Self::Localised { rows } => rows,
            Self::Arr { arr } => arr,
            Self::Bare(rows) => rows,
        }
    }
}

/// Decodes a raw response body into reviews.
///
/// Bodies that are not JSON, or JSON of an unrecognised shape, yield an
/// empty list.
///
/// # Examples
///
/// ```
/// use reviewfeed::feed::wire::decode_reviews;
///
/// let reviews = decode_reviews(r#"{"rows":[{"author":"Jane","rating":"4","text":"Nice"}]}"#);
/// assert_eq!(reviews.len(), 1);
/// assert_eq!(reviews[0].rating, 4);
///
/// assert!(decode_reviews("<html>oops</html>").is_empty());
/// ```
#[must_use]
pub fn decode_reviews(body: &str) -> Vec<Review> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => reviews_from_value(value),
        Err(error) => {
            tracing::debug!("review payload is not JSON: {error}");
            Vec::new()
        }
    }
}

/// Extracts reviews from an already-parsed JSON payload.
#[must_use]
pub fn reviews_from_value(value: Value) -> Vec<Review> {
    let Ok(envelope) = serde_json::from_value::<RowsEnvelope>(value) else {
        tracing::debug!("review payload has an unrecognised shape; treating as empty");
        return Vec::new();
    };

    envelope
        .into_rows()
        .iter()
        .enumerate()
        .filter_map(|(index, row)| review_from_row(index, row))
        .collect()
}

fn review_from_row(index: usize, row: &Value) -> Option<Review> {
    let fields = row.as_object()?;

    let author = scalar_text(fields.get("author"))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_owned());
    let text = scalar_text(fields.get("text")).unwrap_or_default();
    let date = scalar_text(fields.get("date")).filter(|raw| !raw.is_empty());
    let rating = coerce_rating(fields.get("rating"));
    let id = remote_id(index, date.as_deref(), &author);

    Some(Review {
        id,
        author,
        date,
        rating,
        text,
    })
}

/// Builds the id of a fetched row.
///
/// The leading `0` keeps remote ids below millisecond-timestamp ids, so a
/// fresh local submission sorts ahead of same-day remote rows.
fn remote_id(index: usize, date: Option<&str>, author: &str) -> String {
    format!("0{index:06}-{}-{author}", date.unwrap_or_default())
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.trim().to_owned()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerces a wire rating into `[1, 5]`.
///
/// Integers, floats and numeric strings are accepted; missing, zero or
/// non-numeric values fall back to the maximum rating.
fn coerce_rating(value: Option<&Value>) -> u8 {
    let parsed = match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(round_rating)),
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(round_rating))
        }
        _ => None,
    };

    match parsed {
        Some(rating) if rating != 0 => clamp_rating(rating),
        _ => MAX_RATING,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the rating range before the cast"
)]
fn round_rating(raw: f64) -> Option<i64> {
    raw.is_finite().then(|| raw.round().clamp(-1.0, 10.0) as i64)
}
