use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::{oneshot, RwLock};
use crate::backend::BackendClient;
use crate::payment::{
    PaymentError,
    PaymentObserver,
    PaymentTick,
    PaymentVerify,
    PollSnapshot,
    PollStatus,
    VerificationConfig,
};
use crate::payment::internal::io_trait::{PaymentPollerIo, ProductionPaymentPollerIo};

pub mod io_trait;

pub struct PaymentPoller<Io: PaymentPollerIo> {
    io: Arc<Io>,
    config: VerificationConfig,
    die_notice: StdMutex<Option<oneshot::Sender<()>>>,
}

impl<Io: PaymentPollerIo> PaymentPoller<Io> {
    pub fn new(io: Arc<Io>, config: VerificationConfig) -> Self {
        PaymentPoller {
            io,
            config,
            die_notice: StdMutex::new(None),
        }
    }

    /// Starts polling `payment_id`, first stopping whatever this poller
    /// was verifying before. One timer per poller, never more.
    pub fn start_verification(
        &self,
        payment_id: impl Into<String>,
        observer: Arc<dyn PaymentObserver>,
    ) {
        let payment_id = payment_id.into();
        self.stop_verification();
        let (die_notice, die_receiver) = oneshot::channel();
        *self.die_notice.lock().expect("die notice lock poisoned") =
            Some(die_notice);
        debug!("verification of payment {payment_id} started");
        tokio::spawn(
            Self::poll_loop(
                self.io.clone(),
                self.config,
                payment_id,
                observer,
                die_receiver,
            )
        );
    }

    /// Idempotent, and safe to call from observer callbacks: the notice
    /// is consumed here, the task observes it at its next suspend point.
    pub fn stop_verification(&self) {
        if let Some(die_notice) = self.die_notice
            .lock()
            .expect("die notice lock poisoned")
            .take()
        {
            // the task may already have finished on its own
            let _ = die_notice.send(());
        }
    }

    /// One classification without a timer.
    pub async fn check_once(
        &self,
        payment_id: &str,
    ) -> Result<PaymentTick, PaymentError> {
        self.io.fetch_status(payment_id).await
    }

    async fn poll_loop(
        io: Arc<Io>,
        config: VerificationConfig,
        payment_id: String,
        observer: Arc<dyn PaymentObserver>,
        mut die_notice: oneshot::Receiver<()>,
    ) {
        let mut attempt = 0;
        loop {
            attempt += 1;
            observer.on_check(attempt).await;
            match io.fetch_status(&payment_id).await {
                Ok(PaymentTick::Completed { transaction_id }) => {
                    info!("payment {payment_id} confirmed after {attempt} checks");
                    observer.on_success(transaction_id).await;
                    return
                },
                Ok(PaymentTick::Failed { reason }) => {
                    info!("payment {payment_id} failed: {reason}");
                    observer.on_failure(reason).await;
                    return
                },
                Ok(PaymentTick::Pending) => {},
                // a flaky check is not an outcome, it only spends an attempt
                Err(e) => warn!(
                    "status check {attempt} for payment {payment_id} failed: {e}",
                ),
            }
            if attempt >= config.max_attempts {
                info!(
                    "payment {payment_id} still unconfirmed after {attempt} checks",
                );
                observer.on_timeout().await;
                return
            }
            tokio::select! {
                biased;
                _ = &mut die_notice => {
                    debug!("verification of payment {payment_id} stopped");
                    return
                },
                _ = io.wait_interval(config.interval) => {},
            }
        }
    }
}

impl<Io: PaymentPollerIo> Drop for PaymentPoller<Io> {
    fn drop(&mut self) {
        self.stop_verification();
    }
}

pub type ProductionPaymentVerifier = PaymentVerifierImpl<ProductionPaymentPollerIo>;

pub struct PaymentVerifierImpl<Io: PaymentPollerIo> {
    io: Arc<Io>,
    config: VerificationConfig,
    verifications: scc::HashMap<String, Arc<Verification<Io>>>,
}

struct Verification<Io: PaymentPollerIo> {
    poller: PaymentPoller<Io>,
    state: Arc<RwLock<PollSnapshot>>,
}

struct RecordingObserver {
    state: Arc<RwLock<PollSnapshot>>,
}

#[async_trait]
impl PaymentObserver for RecordingObserver {
    async fn on_check(&self, attempt: u32) {
        let mut state = self.state.write().await;
        state.status = PollStatus::Verifying;
        state.attempt_count = attempt;
    }

    async fn on_success(&self, transaction_id: Option<String>) {
        let mut state = self.state.write().await;
        state.status = PollStatus::Succeeded;
        state.transaction_id = transaction_id;
    }

    async fn on_failure(&self, reason: String) {
        let mut state = self.state.write().await;
        state.status = PollStatus::Failed;
        state.reason = Some(reason);
    }

    async fn on_timeout(&self) {
        self.state.write().await.status = PollStatus::TimedOut;
    }
}

impl<Io: PaymentPollerIo> PaymentVerifierImpl<Io> {
    pub fn new_impl(io: Arc<Io>, config: VerificationConfig) -> Self {
        PaymentVerifierImpl {
            io,
            config,
            verifications: scc::HashMap::new(),
        }
    }

    fn verification(&self, payment_id: &str) -> Option<Arc<Verification<Io>>> {
        self.verifications
            .read(payment_id, |_, verification| verification.clone())
    }
}

#[async_trait]
impl<Io: PaymentPollerIo> PaymentVerify for PaymentVerifierImpl<Io> {
    async fn start(&self, payment_id: &str) {
        let verification = match self.verification(payment_id) {
            Some(verification) => verification,
            None => {
                let verification = Arc::new(
                    Verification {
                        poller: PaymentPoller::new(self.io.clone(), self.config),
                        state: Arc::new(RwLock::new(PollSnapshot::waiting())),
                    }
                );
                match self.verifications
                    .insert(payment_id.to_owned(), verification.clone())
                {
                    Ok(()) => verification,
                    // lost the race, reuse whoever won
                    Err(_) => self.verification(payment_id)
                        .expect("verification registry incoherent"),
                }
            },
        };
        *verification.state.write().await = PollSnapshot::waiting();
        verification.poller.start_verification(
            payment_id,
            Arc::new(
                RecordingObserver {
                    state: verification.state.clone(),
                }
            ),
        );
    }

    async fn status(
        &self,
        payment_id: &str,
    ) -> Result<PollSnapshot, PaymentError> {
        if let Some(verification) = self.verification(payment_id) {
            return Ok(verification.state.read().await.clone())
        }
        // nothing managed for this payment: classify once, start nothing
        let tick = self.io.fetch_status(payment_id).await?;
        Ok(PollSnapshot::from_tick(tick))
    }

    async fn stop(&self, payment_id: &str) -> bool {
        match self.verifications.remove(payment_id) {
            Some((_, verification)) => {
                verification.poller.stop_verification();
                true
            },
            None => false,
        }
    }
}

impl ProductionPaymentVerifier {
    pub fn new(backend: BackendClient, config: VerificationConfig) -> Self {
        PaymentVerifierImpl::new_impl(
            Arc::new(ProductionPaymentPollerIo::new(backend)),
            config,
        )
    }
}
