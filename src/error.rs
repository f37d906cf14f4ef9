use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneDoseError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Raw payload matched neither the single-drug nor the polypharmacy
    /// shape. Must surface to the caller; an empty summary in its place
    /// would read as "no risk".
    #[error("Unrecognized analysis payload: {0}")]
    Shape(String),

    /// Asked to aggregate severity over zero per-drug results. There is no
    /// valid "highest risk" answer for an empty set, so the render path for
    /// the current request is dead; callers show an explicit
    /// no-analysis-available state instead of a default severity.
    #[error("No per-drug results to aggregate ({0})")]
    EmptyResultSet(&'static str),

    #[error("{api} API error: {message}")]
    Api { api: String, message: String },

    #[error("Failed to initialize HTTP client: {0}")]
    HttpClientInit(#[source] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
