use thiserror::Error;

/// Failures of a single quote fetch, reported after the fetcher's internal
/// retries are exhausted. Callers only ever see the final outcome.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reachability precheck failed; no request was issued.
    #[error("no internet connection")]
    NoConnection,
    /// Timeout, DNS failure, non-2xx status, or a malformed response body.
    /// The detail includes the HTTP status code when one was received.
    #[error("failed to fetch quote: {0}")]
    Transport(String),
    /// Well-formed response carrying an empty quote array.
    #[error("no quotes received from server")]
    EmptyResponse,
    /// First element was missing its text or author, or either was empty.
    #[error("invalid quote data received")]
    InvalidData,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// An equal quote is already in the saved collection; nothing was written.
    #[error("quote already saved")]
    Duplicate,
    #[error("failed to persist saved quotes: {0}")]
    Persist(String),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("saved quote index {index} is out of range ({len} saved)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("share failed: {0}")]
    Share(String),
}
