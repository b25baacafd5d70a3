use log::debug;
use crate::data::EmailAddress;
use crate::identity::model::{RefreshRequest, RefreshResponse, TokenRequest, TokenResponse};

mod errors;
mod model;

pub use errors::IdentityClientError;
pub use model::IssuedTokens;

/// Client for the platform's identity endpoints. The backend stays the
/// trust boundary: this type never inspects the credentials it carries.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl IdentityClient {
    pub fn new(http: reqwest::Client, base_url: reqwest::Url) -> Self {
        IdentityClient { http, base_url }
    }

    pub async fn obtain_tokens(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<IssuedTokens, IdentityClientError> {
        debug!("exchanging credentials for \"{email}\"");
        let response = self.http
            .post(self.endpoint("token/")?)
            .json(
                &TokenRequest {
                    email: email.as_ref(),
                    password,
                }
            )
            .send()
            .await
            .map_err(IdentityClientError::Transport)?;
        if !response.status().is_success() {
            return Err(IdentityClientError::Rejected)
        }
        let response: TokenResponse = response
            .json()
            .await
            .map_err(|_| IdentityClientError::MalformedResponse)?;
        Ok(
            IssuedTokens {
                access: response.access,
                refresh: response.refresh,
            }
        )
    }

    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<String, IdentityClientError> {
        debug!("calling the token refresh endpoint");
        let response = self.http
            .post(self.endpoint("token/refresh/")?)
            .json(
                &RefreshRequest {
                    refresh: refresh_token,
                }
            )
            .send()
            .await
            .map_err(IdentityClientError::Transport)?;
        if !response.status().is_success() {
            return Err(IdentityClientError::Rejected)
        }
        let response: RefreshResponse = response
            .json()
            .await
            .map_err(|_| IdentityClientError::MalformedResponse)?;
        Ok(response.access)
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, IdentityClientError> {
        self.base_url
            .join(path)
            .map_err(|_| IdentityClientError::InvalidEndpoint)
    }
}
