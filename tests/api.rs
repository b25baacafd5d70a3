use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::json;
use test_utils::{test_rocket, StubIdentityIo, StubPaymentIo};
use tikogate::app_constants::SESSION_COOKIE_NAME;
use tikogate::payment::PaymentTick;

async fn client_with(payment: StubPaymentIo) -> Client {
    Client::tracked(
        test_rocket(StubIdentityIo::organizer_and_attendee(), payment),
    )
        .await
        .expect("rocket build failed")
}

async fn client() -> Client {
    client_with(StubPaymentIo::pending()).await
}

async fn login(client: &Client, email: &str) {
    let response = client
        .post("/api/login")
        .header(ContentType::JSON)
        .body(json!({ "email": email, "password": "s3cret" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn login_sets_cookie_and_returns_client_safe_view() {
    let client = client().await;
    let response = client
        .post("/api/login")
        .header(ContentType::JSON)
        .body(
            json!({
                "email": "organizer@tiko.cm",
                "password": "s3cret",
                "remember_me": true,
            }).to_string()
        )
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert!(response.cookies().get_private(SESSION_COOKIE_NAME).is_some());

    let view: serde_json::Value = response.into_json().await.expect("json body");
    assert_eq!(view["role"], "organizer");
    assert_eq!(view["email"], "organizer@tiko.cm");
    assert_eq!(view["display_name"], "Orga Nizer");
    assert_eq!(view["error"], serde_json::Value::Null);
    assert!(view["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    // the refresh credential must not appear in the projection
    assert!(!view.as_object().unwrap().contains_key("refresh_token"));
}

#[rocket::async_test]
async fn bad_credentials_get_a_generic_rejection() {
    let client = client().await;
    let response = client
        .post("/api/login")
        .header(ContentType::JSON)
        .body(
            json!({ "email": "organizer@tiko.cm", "password": "nope" }).to_string()
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn session_accessor_roundtrip() {
    let client = client().await;
    login(&client, "organizer@tiko.cm").await;

    let response = client.get("/api/session").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let view: serde_json::Value = response.into_json().await.expect("json body");
    assert_eq!(view["role"], "organizer");

    let response = client.get("/api/token").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.expect("json body");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[rocket::async_test]
async fn session_accessor_requires_a_session() {
    let client = client().await;
    let response = client.get("/api/session").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
    let response = client.get("/api/token").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn dashboard_admits_an_organizer() {
    let client = client().await;
    login(&client, "organizer@tiko.cm").await;

    let response = client.get("/dashboard/events").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.expect("html body");
    assert!(body.contains("data-section=\"events\""));
}

#[rocket::async_test]
async fn dashboard_redirects_anonymous_traffic_preserving_destination() {
    let client = client().await;
    let response = client.get("/dashboard/events/ev_1").dispatch().await;
    assert_eq!(response.status(), Status::SeeOther);
    let location = response
        .headers()
        .get_one("Location")
        .expect("redirect location");
    assert!(location.starts_with("/login?next="), "location: {location}");
    assert!(location.contains("dashboard"), "location: {location}");
}

#[rocket::async_test]
async fn dashboard_refuses_a_plain_attendee() {
    let client = client().await;
    login(&client, "fan@tiko.cm").await;

    let response = client.get("/dashboard/events").dispatch().await;
    assert_eq!(response.status(), Status::SeeOther);
}

#[rocket::async_test]
async fn logout_kills_the_session() {
    let client = client().await;
    login(&client, "organizer@tiko.cm").await;

    let response = client.post("/api/logout").dispatch().await;
    assert_eq!(response.status(), Status::NoContent);

    let response = client.get("/api/session").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
    let response = client.get("/dashboard/events").dispatch().await;
    assert_eq!(response.status(), Status::SeeOther);
}

#[rocket::async_test]
async fn payment_verification_surface_reaches_success() {
    let client = client_with(StubPaymentIo::new(vec![
        PaymentTick::Pending,
        PaymentTick::Completed { transaction_id: Some("tx_77".to_owned()) },
    ])).await;
    login(&client, "fan@tiko.cm").await;

    let response = client.post("/api/payments/pay_1/verify").dispatch().await;
    assert_eq!(response.status(), Status::Accepted);

    let mut status_value = String::new();
    for _ in 0..200 {
        let response = client.get("/api/payments/pay_1/status").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let snapshot: serde_json::Value =
            response.into_json().await.expect("json body");
        status_value = snapshot["status"].as_str().unwrap_or("").to_owned();
        if status_value == "succeeded" {
            assert_eq!(snapshot["transaction_id"], "tx_77");
            break
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(status_value, "succeeded");

    let response = client.delete("/api/payments/pay_1/verify").dispatch().await;
    assert_eq!(response.status(), Status::NoContent);
}

#[rocket::async_test]
async fn payment_verification_requires_a_session() {
    let client = client().await;
    let response = client.post("/api/payments/pay_1/verify").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
}
