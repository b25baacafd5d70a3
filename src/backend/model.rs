use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub venue: String,
    pub city: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    pub cover_image_url: Option<String>,
    pub price_from_minor: Option<u64>,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventDetail {
    pub id: String,
    pub organizer_id: String,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub city: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    pub capacity: Option<u32>,
    pub published: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub venue: String,
    pub city: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TicketType {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub price_minor: u64,
    pub currency: String,
    pub quantity_available: Option<u32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub sales_close_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RegistrationRequest {
    pub ticket_type_id: Option<String>,
    pub attendee_name: String,
    pub attendee_email: String,
    pub quantity: u32,
    // free-form answers collected by form-based (unticketed) events
    pub answers: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Registration {
    pub id: String,
    pub event_id: String,
    pub ticket_type_id: Option<String>,
    pub attendee_name: String,
    pub attendee_email: String,
    pub quantity: u32,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MtnMomo,
    OrangeMoney,
    Card,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentInitRequest {
    pub registration_id: String,
    pub method: PaymentMethod,
    // payer phone number, required by the mobile-money methods
    pub msisdn: Option<String>,
    pub return_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentInitResponse {
    pub payment_id: String,
    pub checkout_url: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentStatusEnvelope {
    pub success: bool,
    pub data: Option<PaymentStatusData>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PaymentStatusData {
    pub status: String,
    pub transaction_id: Option<String>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AnalyticsSummary {
    pub events: u64,
    pub registrations: u64,
    pub tickets_sold: u64,
    pub gross_revenue_minor: u64,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Message {
    pub id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub event_id: Option<String>,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewMessage {
    pub to_user_id: String,
    pub event_id: Option<String>,
    pub body: String,
}
