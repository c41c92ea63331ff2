use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Invalid date '{value}'. Expected YYYY-MM-DD: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Reporting window start {min_date} must be before end {end_date}.")]
    DateWindowInverted { min_date: String, end_date: String },
    #[error("Invalid join policy '{value}'. Use 'all-succeed' or 'all-settled'.")]
    InvalidJoinPolicy { value: String },
    #[error("Invalid measure kind '{value}'. Use 'shield', 'enabled', or 'events'.")]
    InvalidMeasureKind { value: String },
    #[error("Measure kind '{kind}' must be mapped exactly once, found {count}.")]
    MeasureKindMapping { kind: String, count: usize },
    #[error("Channel '{channel}' must list at least one version.")]
    EmptyChannel { channel: String },
    #[error("No channels configured.")]
    NoChannels,
    #[error("Set either a source file or a source URL, not both.")]
    ConflictingSources,
    #[error("Missing metrics source (set --source-file or --source-url).")]
    MissingSource,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
