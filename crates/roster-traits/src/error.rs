//! Error types for roster analysis

/// Result type for roster analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all roster strategies
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Document could not be parsed as well-formed markup
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Context was asked to run before a strategy was bound
    #[error("No analysis strategy is bound")]
    NoStrategyBound,

    /// Record query could not be built or evaluated
    #[error("Record query error: {0}")]
    Query(String),

    /// Requested strategy name is not known
    #[error("Unknown strategy: {0}")]
    UnknownBackend(String),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document location could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new malformed document error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedDocument(msg.into())
    }

    /// Create a new record query error
    pub fn query<S: Into<String>>(msg: S) -> Self {
        Error::Query(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// True when the caller can bind a strategy and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoStrategyBound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_strategy_is_recoverable() {
        assert!(Error::NoStrategyBound.is_recoverable());
        assert!(!Error::malformed("unexpected end").is_recoverable());
        assert!(!Error::query("bad path").is_recoverable());
    }

    #[test]
    fn messages_carry_detail() {
        let err = Error::malformed("unclosed tag <Student>");
        assert_eq!(err.to_string(), "Malformed document: unclosed tag <Student>");
    }
}
