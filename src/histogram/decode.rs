use crate::domain::MeasureKind;
use crate::error::HistogramError;

use super::Histogram;

/// Converts a histogram into counts ordered by category index.
///
/// # Errors
///
/// Returns [`HistogramError::DuplicateBucket`] when two buckets share a
/// category, [`HistogramError::ArityMismatch`] when the bucket count is not
/// the category count of `kind`, and [`HistogramError::UnexpectedCategory`]
/// when the starts are not exactly `0..arity`. Nothing is truncated or padded.
pub fn decode(histogram: &Histogram, kind: MeasureKind) -> Result<Vec<u64>, HistogramError> {
    let mut buckets = histogram.buckets.clone();
    buckets.sort_by_key(|bucket| bucket.start);

    if let Some(pair) = buckets
        .windows(2)
        .find(|pair| matches!(pair, [left, right] if left.start == right.start))
        && let Some(bucket) = pair.first()
    {
        return Err(HistogramError::DuplicateBucket {
            start: bucket.start,
        });
    }

    let expected = kind.arity();
    if buckets.len() != expected {
        return Err(HistogramError::ArityMismatch {
            kind,
            expected,
            actual: buckets.len(),
        });
    }

    if let Some((expected, bucket)) = (0_u64..)
        .zip(buckets.iter())
        .find(|(index, bucket)| bucket.start != *index)
    {
        return Err(HistogramError::UnexpectedCategory {
            kind,
            start: bucket.start,
            expected,
        });
    }

    Ok(buckets.into_iter().map(|bucket| bucket.count).collect())
}
