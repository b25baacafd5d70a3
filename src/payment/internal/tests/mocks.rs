use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::UnboundedSender;
use crate::payment::{PaymentError, PaymentObserver, PaymentTick};
use super::super::io_trait::PaymentPollerIo;

pub(super) struct TestPollIo {
    ticks: StdMutex<VecDeque<Result<PaymentTick, PaymentError>>>,
    gate: Semaphore,
    pub fetch_calls: AtomicU32,
}

impl TestPollIo {
    pub fn new(ticks: Vec<Result<PaymentTick, PaymentError>>) -> Self {
        TestPollIo {
            ticks: StdMutex::new(ticks.into()),
            gate: Semaphore::new(0),
            fetch_calls: AtomicU32::new(0),
        }
    }

    /// Releases `count` interval waits; the scripted poller ticks once
    /// per permit after its immediate first check.
    pub fn allow_ticks(&self, count: usize) {
        self.gate.add_permits(count);
    }
}

#[async_trait]
impl PaymentPollerIo for TestPollIo {
    async fn fetch_status(
        &self,
        _payment_id: &str,
    ) -> Result<PaymentTick, PaymentError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.ticks
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PaymentTick::Pending))
    }

    async fn wait_interval(&self, _interval: Duration) {
        self.gate
            .acquire()
            .await
            .expect("tick gate closed")
            .forget();
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Observed {
    Check(u32),
    Success(Option<String>),
    Failure(String),
    Timeout,
}

pub(super) struct ChannelObserver(pub UnboundedSender<Observed>);

#[async_trait]
impl PaymentObserver for ChannelObserver {
    async fn on_check(&self, attempt: u32) {
        let _ = self.0.send(Observed::Check(attempt));
    }

    async fn on_success(&self, transaction_id: Option<String>) {
        let _ = self.0.send(Observed::Success(transaction_id));
    }

    async fn on_failure(&self, reason: String) {
        let _ = self.0.send(Observed::Failure(reason));
    }

    async fn on_timeout(&self) {
        let _ = self.0.send(Observed::Timeout);
    }
}
