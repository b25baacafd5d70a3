use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityClientError {
    #[error("identity endpoint unreachable: {0}")]
    Transport(reqwest::Error),

    #[error("credentials rejected by the identity endpoint")]
    Rejected,

    #[error("identity endpoint returned an unusable response")]
    MalformedResponse,

    #[error("invalid identity endpoint")]
    InvalidEndpoint,
}
