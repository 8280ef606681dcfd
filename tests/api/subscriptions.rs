use crate::helpers::{subscribe_body, TestApp};
use email_capture::domain::subscriber_status::SubscriberStatus;

#[tokio::test]
async fn subscribe_returns_200_and_persists_the_subscriber() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    let response = test_app
        .post_subscribe(&subscribe_body("frank@test.com", "home"))
        .await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["subscribed"], true);

    let subscribers = test_app.store.get_subscribers().await;
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].email.as_ref(), "frank@test.com");
    assert_eq!(subscribers[0].status, SubscriberStatus::Active);
}

#[tokio::test]
async fn subscribe_sends_welcome_and_admin_emails() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    test_app
        .post_subscribe(&subscribe_body("frank@test.com", "home"))
        .await;

    let received_requests = test_app.email_server.received_requests().await.unwrap();

    // One welcome to the subscriber, one notification to the admin
    assert_eq!(received_requests.len(), 2);
}

#[tokio::test]
async fn resubmitting_the_same_email_updates_the_existing_record() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    test_app
        .post_subscribe(&subscribe_body("frank@test.com", "home"))
        .await;
    test_app
        .post_subscribe(&subscribe_body("frank@test.com", "about"))
        .await;

    let subscribers = test_app.store.get_subscribers().await;

    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].source.as_ref(), "about");
}

#[tokio::test]
async fn subscribe_returns_400_when_payload_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    // Table-driven cases; the count stays under the rate-limit ceiling
    // because invalid submissions still consume an attempt
    let test_cases = vec![
        (
            serde_json::json!({ "source": "home", "recaptchaToken": "x" }),
            "missing email parameter",
        ),
        (
            subscribe_body("not-an-email", "home"),
            "invalid email parameter",
        ),
        (
            serde_json::json!({ "email": "frank@test.com", "source": "home" }),
            "missing recaptcha token",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_subscribe(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }

    assert!(test_app.store.get_subscribers().await.is_empty());
}

#[tokio::test]
async fn subscribe_returns_400_for_an_unknown_source() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .post_subscribe(&subscribe_body("frank@test.com", "not-a-real-source"))
        .await;

    assert_eq!(400, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid source");

    assert!(test_app.store.get_subscribers().await.is_empty());
}

#[tokio::test]
async fn subscribe_returns_429_once_the_rate_limit_is_hit() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    for n in 0..5 {
        let response = test_app
            .post_subscribe(&subscribe_body(&format!("frank{}@test.com", n), "home"))
            .await;

        assert_eq!(200, response.status().as_u16(), "attempt {}", n);
    }

    let response = test_app
        .post_subscribe(&subscribe_body("frank6@test.com", "home"))
        .await;

    assert_eq!(429, response.status().as_u16());

    // The sixth attempt wrote nothing and sent nothing
    assert_eq!(test_app.store.get_subscribers().await.len(), 5);
    let received_requests = test_app.email_server.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 10);
}

#[tokio::test]
async fn subscribe_returns_403_for_a_cross_origin_request() {
    let test_app = TestApp::spawn_app().await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/subscribe", test_app.address))
        .header("Origin", "https://evil.example.net")
        .json(&subscribe_body("frank@test.com", "home"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(403, response.status().as_u16());
    assert!(test_app.store.get_subscribers().await.is_empty());
}

#[tokio::test]
async fn subscribe_returns_405_for_wrong_methods() {
    let test_app = TestApp::spawn_app().await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/subscribe", test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(405, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_answers_cors_preflight() {
    let test_app = TestApp::spawn_app().await;

    let client = reqwest::Client::new();
    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/subscribe", test_app.address),
        )
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response
            .headers()
            .get("Access-Control-Allow-Origin")
            .map(|value| value.to_str().unwrap()),
        Some("*")
    );
}

#[tokio::test]
async fn subscribe_returns_500_when_the_email_provider_fails() {
    let test_app = TestApp::spawn_app().await;

    wiremock::Mock::given(wiremock::matchers::path("/mail/send"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_subscribe(&subscribe_body("frank@test.com", "home"))
        .await;

    assert_eq!(500, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(body["success"], false);

    // Persistence happened before the send failed: best-effort policy keeps
    // the record even when the response is a 500
    assert_eq!(test_app.store.get_subscribers().await.len(), 1);
}

#[tokio::test]
async fn subscribe_returns_400_for_malformed_json() {
    let test_app = TestApp::spawn_app().await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/subscribe", test_app.address))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid request body");
}
