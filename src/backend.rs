use crate::backend::model::*;

mod errors;
pub mod model;

pub use errors::BackendClientError;

/// Thin client for the platform's REST resource API. Every call is a
/// plain request/response passthrough; the API itself is an external
/// collaborator and is not re-modelled here.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, base_url: reqwest::Url) -> Self {
        BackendClient { http, base_url }
    }

    pub async fn list_events(
        &self,
        search: Option<&str>,
        page: Option<u32>,
    ) -> Result<Vec<EventSummary>, BackendClientError> {
        let mut request = self.http.get(self.endpoint("events")?);
        if let Some(search) = search {
            request = request.query(&[("search", search)]);
        }
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }
        Ok(
            request
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn get_event(
        &self,
        event_id: &str,
    ) -> Result<EventDetail, BackendClientError> {
        Ok(
            self.http
                .get(self.endpoint(&format!("events/{event_id}"))?)
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn create_event(
        &self,
        access_token: &str,
        event: &NewEvent,
    ) -> Result<EventDetail, BackendClientError> {
        Ok(
            self.http
                .post(self.endpoint("events")?)
                .bearer_auth(access_token)
                .json(event)
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn update_event(
        &self,
        access_token: &str,
        event_id: &str,
        event: &NewEvent,
    ) -> Result<EventDetail, BackendClientError> {
        Ok(
            self.http
                .put(self.endpoint(&format!("events/{event_id}"))?)
                .bearer_auth(access_token)
                .json(event)
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn delete_event(
        &self,
        access_token: &str,
        event_id: &str,
    ) -> Result<(), BackendClientError> {
        self.http
            .delete(self.endpoint(&format!("events/{event_id}"))?)
            .bearer_auth(access_token)
            .send().await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn ticket_types(
        &self,
        event_id: &str,
    ) -> Result<Vec<TicketType>, BackendClientError> {
        Ok(
            self.http
                .get(self.endpoint(&format!("events/{event_id}/ticket-types"))?)
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn register_attendee(
        &self,
        event_id: &str,
        registration: &RegistrationRequest,
    ) -> Result<Registration, BackendClientError> {
        Ok(
            self.http
                .post(self.endpoint(&format!("events/{event_id}/registrations"))?)
                .json(registration)
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn initiate_payment(
        &self,
        request: &PaymentInitRequest,
    ) -> Result<PaymentInitResponse, BackendClientError> {
        Ok(
            self.http
                .post(self.endpoint("payments")?)
                .json(request)
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn payment_status(
        &self,
        payment_id: &str,
    ) -> Result<PaymentStatusEnvelope, BackendClientError> {
        Ok(
            self.http
                .get(self.endpoint("payments")?)
                .query(&[("id", payment_id)])
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn analytics_summary(
        &self,
        access_token: &str,
        event_id: Option<&str>,
    ) -> Result<AnalyticsSummary, BackendClientError> {
        let mut request = self.http
            .get(self.endpoint("analytics/summary")?)
            .bearer_auth(access_token);
        if let Some(event_id) = event_id {
            request = request.query(&[("event_id", event_id)]);
        }
        Ok(
            request
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn list_messages(
        &self,
        access_token: &str,
        event_id: Option<&str>,
    ) -> Result<Vec<Message>, BackendClientError> {
        let mut request = self.http
            .get(self.endpoint("messages")?)
            .bearer_auth(access_token);
        if let Some(event_id) = event_id {
            request = request.query(&[("event_id", event_id)]);
        }
        Ok(
            request
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    pub async fn send_message(
        &self,
        access_token: &str,
        message: &NewMessage,
    ) -> Result<Message, BackendClientError> {
        Ok(
            self.http
                .post(self.endpoint("messages")?)
                .bearer_auth(access_token)
                .json(message)
                .send().await?
                .error_for_status()?
                .json().await?
        )
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, BackendClientError> {
        self.base_url
            .join(path)
            .map_err(|_| BackendClientError::InvalidEndpoint)
    }
}
