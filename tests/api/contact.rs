use crate::helpers::{contact_body, TestApp};
use email_capture::domain::contact_status::ContactStatus;

#[tokio::test]
async fn contact_returns_200_and_appends_a_record() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    let response = test_app
        .post_contact(&contact_body(
            "Frank",
            "frank@test.com",
            "Hello",
            "Just saying hi.",
        ))
        .await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["received"], true);

    let contacts = test_app.store.get_contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "Frank");
    assert_eq!(contacts[0].status, ContactStatus::New);
}

#[tokio::test]
async fn repeated_contact_messages_are_never_merged() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    for _ in 0..2 {
        test_app
            .post_contact(&contact_body(
                "Frank",
                "frank@test.com",
                "Hello",
                "Same message twice.",
            ))
            .await;
    }

    assert_eq!(test_app.store.get_contacts().await.len(), 2);
}

#[tokio::test]
async fn contact_fields_are_sanitized_before_persisting() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    test_app
        .post_contact(&contact_body(
            "<b>Frank</b>",
            "frank@test.com",
            "Hello",
            "<script>alert(1)</script>",
        ))
        .await;

    let contacts = test_app.store.get_contacts().await;

    assert_eq!(contacts.len(), 1);
    assert!(!contacts[0].name.contains('<'));
    assert!(!contacts[0].message.contains('<'));
}

#[tokio::test]
async fn contact_returns_400_when_payload_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    // The contact ceiling is only 3 per window, so exactly three cases
    let test_cases = vec![
        (
            contact_body("", "frank@test.com", "Hello", "Hi."),
            "empty name",
        ),
        (
            contact_body("Frank", "not-an-email", "Hello", "Hi."),
            "invalid email",
        ),
        (contact_body("Frank", "frank@test.com", "Hello", ""), "empty message"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }

    assert!(test_app.store.get_contacts().await.is_empty());
}

#[tokio::test]
async fn contact_returns_429_once_the_rate_limit_is_hit() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    for n in 0..3 {
        let response = test_app
            .post_contact(&contact_body("Frank", "frank@test.com", "Hello", "Hi."))
            .await;

        assert_eq!(200, response.status().as_u16(), "attempt {}", n);
    }

    let response = test_app
        .post_contact(&contact_body("Frank", "frank@test.com", "Hello", "Hi."))
        .await;

    assert_eq!(429, response.status().as_u16());
    assert_eq!(test_app.store.get_contacts().await.len(), 3);
}
