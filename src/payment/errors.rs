use thiserror::Error;
use crate::backend::BackendClientError;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment status request failed: {0}")]
    Backend(#[from] BackendClientError),

    #[error("payment status response unusable")]
    MalformedResponse,
}
