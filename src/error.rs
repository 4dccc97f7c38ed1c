use thiserror::Error;

/// Error type shared by every module of the crate.
///
/// All variants are recoverable; the library never aborts on bad input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid period: {0:?}")]
    InvalidPeriod(String),

    #[error("empty series: {0}")]
    EmptySeries(String),

    #[error("model fit error: {0}")]
    ModelFitError(String),

    #[error("insufficient data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("unknown model: {0:?} (expected \"statistical\" or \"trend_heuristic\")")]
    UnknownModel(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("data format error: {0}")]
    Format(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("invalid TOML: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("invalid YAML: {}", err))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Format(format!("timestamp parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_value() {
        let err = Error::InvalidPeriod("fortnightly".to_string());
        assert!(err.to_string().contains("fortnightly"));

        let err = Error::UnknownModel("prophet".to_string());
        assert!(err.to_string().contains("prophet"));

        let err = Error::InsufficientData { needed: 2, got: 1 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 2 points, got 1"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
