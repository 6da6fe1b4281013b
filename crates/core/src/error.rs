use thiserror::Error;

/// Result type for searcheval operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for searcheval operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or unreadable evaluation dataset
    #[error("Dataset error in {file}: {message}")]
    Dataset { file: String, message: String },

    /// Errors returned by the search service
    #[error("Search service error: {0}")]
    Search(String),

    /// Errors while writing reports
    #[error("Report error: {0}")]
    Report(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a dataset error
    pub fn dataset(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dataset {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates a search service error
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }

    /// Creates a report error
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

/// Converts a signed cutoff (as read from loosely typed input) into a rank cutoff
///
/// Negative values are rejected rather than clamped.
pub fn cutoff_from_i64(k: i64) -> Result<usize> {
    usize::try_from(k).map_err(|_| {
        Error::invalid_input(format!("cutoff k must be a non-negative integer, got {k}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_from_i64_accepts_zero_and_positive() {
        assert_eq!(cutoff_from_i64(0).unwrap(), 0);
        assert_eq!(cutoff_from_i64(3).unwrap(), 3);
    }

    #[test]
    fn test_cutoff_from_i64_rejects_negative() {
        let err = cutoff_from_i64(-1).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_result_ext_wraps_source() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("Failed to open dataset").unwrap_err();
        assert_eq!(err.to_string(), "Failed to open dataset: missing");
    }
}
