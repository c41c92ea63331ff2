use super::SeriesPoint;

/// Orders points by timestamp and drops zero-valued points.
///
/// This does not merge points that share a timestamp; two non-zero points
/// for the same day both survive.
#[must_use]
pub fn normalize(mut points: Vec<SeriesPoint>) -> Vec<SeriesPoint> {
    points.sort_by_key(|point| point.timestamp_ms);
    points.retain(|point| point.value != 0.0);
    points
}
