use std::time::Duration;
use async_trait::async_trait;
use crate::backend::BackendClient;
use crate::backend::model::PaymentStatusEnvelope;
use crate::payment::{PaymentError, PaymentTick};

#[async_trait]
pub trait PaymentPollerIo: Send + Sync + 'static {
    async fn fetch_status(
        &self,
        payment_id: &str,
    ) -> Result<PaymentTick, PaymentError>;

    async fn wait_interval(&self, interval: Duration);
}

pub struct ProductionPaymentPollerIo {
    backend: BackendClient,
}

impl ProductionPaymentPollerIo {
    pub fn new(backend: BackendClient) -> Self {
        ProductionPaymentPollerIo { backend }
    }
}

#[async_trait]
impl PaymentPollerIo for ProductionPaymentPollerIo {
    async fn fetch_status(
        &self,
        payment_id: &str,
    ) -> Result<PaymentTick, PaymentError> {
        classify(self.backend.payment_status(payment_id).await?)
    }

    async fn wait_interval(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

fn classify(
    envelope: PaymentStatusEnvelope,
) -> Result<PaymentTick, PaymentError> {
    let data = envelope.data
        .filter(|_| envelope.success)
        .ok_or(PaymentError::MalformedResponse)?;
    Ok(
        match data.status.as_str() {
            "completed" => PaymentTick::Completed {
                transaction_id: data.transaction_id,
            },
            "failed" => PaymentTick::Failed {
                reason: data.reason
                    .unwrap_or_else(|| "payment failed".to_owned()),
            },
            _ => PaymentTick::Pending,
        }
    )
}
