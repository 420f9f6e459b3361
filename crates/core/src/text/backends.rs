#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TextBackendError {
    #[error("text backend unavailable")]
    Unavailable,
    #[error("text backend failed: {0}")]
    Failed(String),
}

/// Counts grammar and spelling issues in a transcript.
pub trait GrammarChecker: Send + Sync {
    fn count_errors(&self, text: &str) -> Result<usize, TextBackendError>;
}

/// Overall sentiment of a transcript as a compound polarity in `[-1, 1]`.
pub trait SentimentAnalyzer: Send + Sync {
    fn compound(&self, text: &str) -> Result<f64, TextBackendError>;
}
