mod errors;
mod internal;

use async_trait::async_trait;
use serde::Serialize;

pub use errors::PaymentError;
pub use internal::{PaymentPoller, PaymentVerifierImpl, ProductionPaymentVerifier};
pub use internal::io_trait::{PaymentPollerIo, ProductionPaymentPollerIo};

/// Backend-reported outcome of a single status check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PaymentTick {
    Completed { transaction_id: Option<String> },
    Failed { reason: String },
    Pending,
}

/// Callbacks fired by a running verification. At most one of the
/// terminal callbacks fires per verification.
#[async_trait]
pub trait PaymentObserver: Send + Sync + 'static {
    async fn on_check(&self, attempt: u32);
    async fn on_success(&self, transaction_id: Option<String>);
    async fn on_failure(&self, reason: String);
    async fn on_timeout(&self);
}

#[derive(Clone, Copy, Debug)]
pub struct VerificationConfig {
    pub interval: std::time::Duration,
    pub max_attempts: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    Waiting,
    Verifying,
    Succeeded,
    Failed,
    TimedOut,
}

#[derive(Clone, Debug, Serialize)]
pub struct PollSnapshot {
    pub status: PollStatus,
    pub attempt_count: u32,
    pub transaction_id: Option<String>,
    pub reason: Option<String>,
}

impl PollSnapshot {
    pub fn waiting() -> Self {
        PollSnapshot {
            status: PollStatus::Waiting,
            attempt_count: 0,
            transaction_id: None,
            reason: None,
        }
    }

    pub fn from_tick(tick: PaymentTick) -> Self {
        let mut snapshot = PollSnapshot::waiting();
        match tick {
            PaymentTick::Completed { transaction_id } => {
                snapshot.status = PollStatus::Succeeded;
                snapshot.transaction_id = transaction_id;
            },
            PaymentTick::Failed { reason } => {
                snapshot.status = PollStatus::Failed;
                snapshot.reason = Some(reason);
            },
            PaymentTick::Pending => {},
        }
        snapshot
    }
}

/// Verification registry exposed to the web layer: at most one managed
/// verification per payment id.
#[async_trait]
pub trait PaymentVerify: Send + Sync + 'static {
    async fn start(&self, payment_id: &str);

    async fn status(&self, payment_id: &str) -> Result<PollSnapshot, PaymentError>;

    async fn stop(&self, payment_id: &str) -> bool;
}
