use crate::helpers::{contact_body, subscribe_body, TestApp};

#[tokio::test]
async fn subscriber_stats_reflect_the_stored_records() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    test_app
        .post_subscribe(&subscribe_body("a@test.com", "home"))
        .await;
    test_app
        .post_subscribe(&subscribe_body("b@test.com", "home"))
        .await;
    test_app
        .post_subscribe(&subscribe_body("c@test.com", "newsletter"))
        .await;

    let response = test_app.get("/api/stats/subscribers").await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["active"], 3);
    assert_eq!(body["data"]["by_source"]["home"], 2);
    assert_eq!(body["data"]["by_source"]["newsletter"], 1);
}

#[tokio::test]
async fn contact_stats_reflect_the_stored_records() {
    let test_app = TestApp::spawn_app().await;
    test_app.mount_email_mock().await;

    test_app
        .post_contact(&contact_body("Frank", "frank@test.com", "Hello", "Hi."))
        .await;

    let response = test_app.get("/api/stats/contacts").await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["by_status"]["new"], 1);
}

#[tokio::test]
async fn stats_are_empty_before_any_submission() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get("/api/stats/subscribers").await;
    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");

    assert_eq!(body["data"]["total"], 0);
}
