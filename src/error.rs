use thiserror::Error;

/// Convenience result type used across the crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// Error type returned by lookups, ingestion and the CLI layer.
///
/// This is a single error enum shared by all three parsers and the data model. Use
/// [`StatsError::kind`] to branch on the broad category.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (invalid UTF-8, I/O failures inside the reader).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A lookup for an area, measure, name or year missed.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// A value had the wrong shape (e.g. a language code that is not three letters).
    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    /// A cell or header token could not be parsed into the required type.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// The input structure is wrong: bad field counts, empty input, malformed JSON records.
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// The caller's configuration is unusable (missing mapping keys, unknown format tags).
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

/// Broad error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    NotFound,
    InvalidFormat,
    ParseFailure,
    Configuration,
}

impl StatsError {
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => ErrorKind::Io,
                _ => ErrorKind::ParseFailure,
            },
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::ParseError { .. } | Self::Malformed { .. } => ErrorKind::ParseFailure,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }
}
