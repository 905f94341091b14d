use serde_json::json;
use slotbook_common::services::NotificationService;
use slotbook_config::MailConfig;
use slotbook_mail::{MailError, ResendNotificationService};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ResendNotificationService {
    ResendNotificationService::new(
        reqwest::Client::new(),
        &server.uri(),
        "re_test_key",
        "MedDeFi <onboarding@resend.dev>",
    )
}

#[tokio::test]
async fn test_send_email_posts_html_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test_key"))
        .and(body_partial_json(json!({
            "from": "MedDeFi <onboarding@resend.dev>",
            "to": ["ana@example.com"],
            "subject": "Cita confirmada: Llamada con Dr. Ada",
            "html": "<p>hola</p>"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_123" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = service_for(&server)
        .send_email(
            "ana@example.com",
            "Cita confirmada: Llamada con Dr. Ada",
            "<p>hola</p>",
            true,
        )
        .await
        .unwrap();

    assert_eq!(result.id, "email_123");
    assert_eq!(result.status, "sent");
}

#[tokio::test]
async fn test_provider_rejection_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "statusCode": 422,
            "message": "Invalid `to` field."
        })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .send_email("not-an-email", "subject", "body", false)
        .await
        .unwrap_err();

    match err {
        MailError::Api { status, message } => {
            assert_eq!(status, 422);
            assert!(message.contains("Invalid"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unresolved_secret_is_a_config_error() {
    let config = MailConfig {
        api_url: None,
        api_key: "secret_from_env".to_string(),
        from: "MedDeFi <onboarding@resend.dev>".to_string(),
        brand_name: None,
    };

    let err = ResendNotificationService::from_config(&config).unwrap_err();
    assert!(matches!(err, MailError::Config(_)));
}
