use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_works() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get("/health_check").await;

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn responses_carry_the_hardening_headers() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get("/health_check").await;
    let headers = response.headers();

    assert_eq!(
        headers.get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
}
