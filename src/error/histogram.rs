use thiserror::Error;

use crate::domain::MeasureKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistogramError {
    #[error("{kind} histogram has {actual} buckets, expected {expected}.")]
    ArityMismatch {
        kind: MeasureKind,
        expected: usize,
        actual: usize,
    },
    #[error("Histogram has more than one bucket starting at {start}.")]
    DuplicateBucket { start: u64 },
    #[error("{kind} histogram has a bucket starting at {start}, expected category {expected}.")]
    UnexpectedCategory {
        kind: MeasureKind,
        start: u64,
        expected: u64,
    },
}
