use thiserror::Error;

/// Result type for agdistill-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating raw session records
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown hook event: {0}")]
    UnknownEvent(String),

    #[error("Malformed {kind} payload: {source}")]
    Payload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
