//! Landing page integration tests.

mod common;

use common::{cookie_header, session_cookie, TestHarness};

#[tokio::test]
async fn signed_out_visitor_sees_login_links() {
    let harness = TestHarness::new();

    let response = harness.server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Federal University of Lafia"));
    assert!(html.contains("Online ID Card Enrollment System"));
    assert!(html.contains("Login / Register"));
    assert!(html.contains("Get Started"));
    assert!(!html.contains("Logged In"));
}

#[tokio::test]
async fn signed_in_student_sees_apply_and_dashboard() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let (name, value) = session_cookie(&session);

    let response = harness.server.get("/").add_header(name, value).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Logged In"));
    assert!(html.contains("Apply for ID Card"));
    assert!(html.contains("View Dashboard"));
    assert!(!html.contains("Get Started"));
}

#[tokio::test]
async fn stale_token_renders_signed_out_page() {
    let harness = TestHarness::new();
    let (name, value) = cookie_header("idcard_session=expired-token");

    let response = harness.server.get("/").add_header(name, value).await;

    response.assert_status_ok();
    assert!(response.text().contains("Login / Register"));
}

#[tokio::test]
async fn notice_code_shows_toast() {
    let harness = TestHarness::new();

    let response = harness.server.get("/?notice=signed-out").await;

    response.assert_status_ok();
    assert!(response.text().contains("You have been logged out"));
}

#[tokio::test]
async fn unknown_notice_is_ignored() {
    let harness = TestHarness::new();

    let response = harness.server.get("/?notice=%3Cscript%3E").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(!html.contains(r#"id="toast""#));
    assert!(!html.contains("<script>alert"));
}
