use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendClientError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid backend endpoint")]
    InvalidEndpoint,
}
