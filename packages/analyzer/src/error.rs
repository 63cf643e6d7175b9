use thiserror::Error;

/// Internal failures. None of these abort the analysis of a file; they are
/// logged at the rule or context boundary and the affected unit produces no
/// diagnostics.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    TypeCheck(#[from] ts::TypeCheckError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("unknown rule severity `{0}`")]
    InvalidSeverity(String),

    #[error("malformed schema data from {origin}: {message}")]
    MalformedSchema { origin: String, message: String },

    #[error("file `{0}` is not part of the program")]
    UnknownFile(String),

    #[error("component discovery failed for `{file_name}`: {message}")]
    Discovery { file_name: String, message: String },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
