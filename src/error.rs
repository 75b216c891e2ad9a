use thiserror::Error;

/// Errors produced while normalizing messages or building reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A date value could not be turned into an absolute instant.
    #[error("Malformed date {value:?} on message {}", describe_id(.id))]
    MalformedDate { id: Option<i64>, value: String },

    /// An admitted record carries no integer `id`.
    #[error("Message at index {index} has no integer id")]
    MissingId { index: usize },

    /// A configured UTC offset is outside the representable range.
    #[error("Invalid UTC offset: {0} minutes")]
    InvalidUtcOffset(i32),
}

fn describe_id(id: &Option<i64>) -> String {
    id.map_or_else(|| "?".to_string(), |id| id.to_string())
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatsError>;
