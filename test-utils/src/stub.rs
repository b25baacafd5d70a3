use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;
use tikogate::data::EmailAddress;
use tikogate::identity::{IdentityClientError, IssuedTokens};
use tikogate::payment::{PaymentError, PaymentPollerIo, PaymentTick};
use tikogate::rng::make_uuid;
use tikogate::session::SessionManagerIo;
use crate::token::make_access_token;

pub struct StubUser {
    pub email: &'static str,
    pub password: &'static str,
    pub user_id: &'static str,
    pub display_name: &'static str,
    pub role: &'static str,
}

/// Identity backend replacement: a fixed user table, tokens minted on
/// the spot, refresh credentials of the form `refresh-<user id>`.
pub struct StubIdentityIo {
    users: Vec<StubUser>,
    access_token_validity: Duration,
}

impl StubIdentityIo {
    pub fn new(users: Vec<StubUser>) -> Self {
        StubIdentityIo {
            users,
            access_token_validity: Duration::minutes(15),
        }
    }

    pub fn organizer_and_attendee() -> Self {
        StubIdentityIo::new(vec![
            StubUser {
                email: "organizer@tiko.cm",
                password: "s3cret",
                user_id: "u_org",
                display_name: "Orga Nizer",
                role: "organizer",
            },
            StubUser {
                email: "fan@tiko.cm",
                password: "s3cret",
                user_id: "u_fan",
                display_name: "Festival Fan",
                role: "user",
            },
        ])
    }

    fn token_for(&self, user: &StubUser) -> String {
        make_access_token(
            user.user_id,
            user.email,
            user.display_name,
            user.role,
            Some(OffsetDateTime::now_utc() + self.access_token_validity),
        )
    }
}

#[async_trait]
impl SessionManagerIo for StubIdentityIo {
    async fn exchange_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<IssuedTokens, IdentityClientError> {
        let user = self.users
            .iter()
            .find(|user| user.email == email.as_ref() && user.password == password)
            .ok_or(IdentityClientError::Rejected)?;
        Ok(
            IssuedTokens {
                access: self.token_for(user),
                refresh: Some(format!("refresh-{}", user.user_id)),
            }
        )
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<String, IdentityClientError> {
        let user_id = refresh_token
            .strip_prefix("refresh-")
            .ok_or(IdentityClientError::Rejected)?;
        let user = self.users
            .iter()
            .find(|user| user.user_id == user_id)
            .ok_or(IdentityClientError::Rejected)?;
        Ok(self.token_for(user))
    }

    fn get_time(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::rng())
    }
}

/// Payment backend replacement: a scripted sequence of ticks, pending
/// forever once the script runs out.
pub struct StubPaymentIo {
    ticks: StdMutex<VecDeque<PaymentTick>>,
}

impl StubPaymentIo {
    pub fn new(ticks: Vec<PaymentTick>) -> Self {
        StubPaymentIo {
            ticks: StdMutex::new(ticks.into()),
        }
    }

    pub fn pending() -> Self {
        StubPaymentIo::new(Vec::new())
    }
}

#[async_trait]
impl PaymentPollerIo for StubPaymentIo {
    async fn fetch_status(
        &self,
        _payment_id: &str,
    ) -> Result<PaymentTick, PaymentError> {
        Ok(
            self.ticks
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(PaymentTick::Pending)
        )
    }

    async fn wait_interval(&self, _interval: std::time::Duration) {
        tokio::task::yield_now().await;
    }
}
