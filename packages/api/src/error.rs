use feedback_store::StoreError;

/// Failures a handler cannot recover from within the request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Password(String),
}
