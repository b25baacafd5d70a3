use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;
use crate::data::EmailAddress;
use crate::identity::{IdentityClient, IdentityClientError, IssuedTokens};
use crate::rng::make_uuid;

#[async_trait]
pub trait SessionManagerIo: Send + Sync + 'static {
    async fn exchange_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<IssuedTokens, IdentityClientError>;

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<String, IdentityClientError>;

    fn get_time(&self) -> OffsetDateTime;

    fn generate_uuid(&self) -> Uuid;
}

pub struct ProductionSessionManagerIo {
    identity: IdentityClient,
}

impl ProductionSessionManagerIo {
    pub fn new(identity: IdentityClient) -> Self {
        ProductionSessionManagerIo { identity }
    }
}

#[async_trait]
impl SessionManagerIo for ProductionSessionManagerIo {
    async fn exchange_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<IssuedTokens, IdentityClientError> {
        self.identity.obtain_tokens(email, password).await
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<String, IdentityClientError> {
        self.identity.refresh(refresh_token).await
    }

    fn get_time(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::rng())
    }
}
