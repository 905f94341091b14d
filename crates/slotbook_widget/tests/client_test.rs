use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use slotbook_common::models::{BookingDetails, OrganizerProfile};
use slotbook_widget::{BookingSubmission, ClientError, SchedulerClient};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SchedulerClient {
    SchedulerClient::with_client(reqwest::Client::new(), &server.uri())
        .with_userinfo_url(&format!("{}/oauth2/v3/userinfo", server.uri()))
}

#[tokio::test]
async fn availability_posts_the_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/availability"))
        .and(body_json(json!({ "accessToken": "ya29.token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "busy": [{ "start": "2025-05-05T07:00:00Z", "end": "2025-05-05T07:30:00Z" }],
            "eventType": { "duration": 30, "buffer_time": 10 },
            "availability": [{ "day_of_week": 1, "start_time": "09:00:00", "end_time": "17:00:00" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).fetch_availability("ya29.token").await.unwrap();
    assert_eq!(response.busy.len(), 1);
    assert_eq!(response.event_type.buffer_time, 10);
    assert_eq!(response.availability[0].day_of_week, 1);
}

#[tokio::test]
async fn error_envelope_surfaces_its_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/availability"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Failed to fetch availability",
            "details": "Access token is required"
        })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_availability("").await.unwrap_err();
    match &err {
        ClientError::Api { status, error, .. } => {
            assert_eq!(*status, 400);
            assert_eq!(error, "Failed to fetch availability");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.details(), "Access token is required");
}

#[tokio::test]
async fn non_envelope_failures_keep_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let submission = BookingSubmission {
        access_token: "tok".to_string(),
        selected_slot: Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap(),
        details: BookingDetails::default(),
        profile: OrganizerProfile::default(),
        duration: 30,
    };
    let err = client(&server).book(&submission).await.unwrap_err();
    assert!(
        matches!(err, ClientError::UnexpectedResponse { status: 502, ref body } if body == "Bad Gateway")
    );
}

#[tokio::test]
async fn booking_sends_camel_case_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book"))
        .and(body_partial_json(json!({
            "accessToken": "tok",
            "selectedSlot": "2025-05-05T09:00:00Z",
            "details": { "name": "Ana", "email": "ana@example.com", "notes": "Hola" },
            "profile": { "name": "Dr. Ada", "email": "ada@example.com" },
            "duration": 30
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Event created and saved",
            "data": { "id": "evt_1", "hangoutLink": "https://meet.google.com/x" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let submission = BookingSubmission {
        access_token: "tok".to_string(),
        selected_slot: Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap(),
        details: BookingDetails {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            notes: Some("Hola".to_string()),
        },
        profile: OrganizerProfile {
            name: "Dr. Ada".to_string(),
            email: "ada@example.com".to_string(),
        },
        duration: 30,
    };
    let confirmation = client(&server).book(&submission).await.unwrap();
    assert_eq!(confirmation.message, "Event created and saved");
    assert_eq!(confirmation.data["id"], "evt_1");
}

#[tokio::test]
async fn slots_send_the_date_and_zone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/slots"))
        .and(body_json(json!({
            "accessToken": "tok",
            "date": "2025-05-05",
            "timeZone": "Europe/Madrid"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "date": "2025-05-05",
            "timeZone": "Europe/Madrid",
            "slots": ["2025-05-05T09:00:00+02:00", "2025-05-05T09:30:00+02:00"]
        })))
        .mount(&server)
        .await;

    let response = client(&server)
        .fetch_slots(
            "tok",
            NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
            Some("Europe/Madrid"),
        )
        .await
        .unwrap();
    assert_eq!(response.slots.len(), 2);
    assert_eq!(response.slots[1].to_rfc3339(), "2025-05-05T09:30:00+02:00");
}

#[tokio::test]
async fn profile_uses_the_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/v3/userinfo"))
        .and(header("authorization", "Bearer ya29.token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "42",
            "name": "Dr. Ada",
            "email": "ada@example.com",
            "email_verified": true
        })))
        .mount(&server)
        .await;

    let profile = client(&server).fetch_profile("ya29.token").await.unwrap();
    assert_eq!(profile.name, "Dr. Ada");
    assert_eq!(profile.email, "ada@example.com");
}
