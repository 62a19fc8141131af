//! Dashboard integration tests.

mod common;

use std::future::IntoFuture;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use common::{cookie_header, location, session_cookie, set_cookies, TestHarness};
use idcard_backend::AuthProvider;
use idcard_core::{Application, ApplicationStatus, UserId};

fn application(user_id: UserId, id: &str, status: ApplicationStatus, age_days: i64) -> Application {
    Application {
        id: id.to_string(),
        user_id,
        matric_number: "FUL/SCI/20/0042".into(),
        faculty: "Faculty of Science".into(),
        department: "Computer Science".into(),
        level: "300".into(),
        passport_photo_url: Some("http://localhost/storage/passport-photos/p.jpg".into()),
        signature_url: Some("http://localhost/storage/signatures/s.png".into()),
        status,
        created_at: Utc::now() - Duration::days(age_days),
    }
}

/// Wait until the live stream has subscribed.
async fn wait_for_subscriber(harness: &TestHarness) {
    while harness.backend.subscriber_count() == 0 {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Page
// ============================================================================

#[tokio::test]
async fn dashboard_requires_session() {
    let harness = TestHarness::new();

    let response = harness.server.get("/dashboard").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth");
}

#[tokio::test]
async fn empty_dashboard_offers_apply() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let (name, value) = session_cookie(&session);

    let response = harness.server.get("/dashboard").add_header(name, value).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("No Applications Found"));
    assert!(html.contains(r#"href="/apply""#));
}

#[tokio::test]
async fn cards_are_listed_newest_first() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let owner = session.user_id;
    harness
        .backend
        .seed_application(application(owner, "aaaaaaaa-old", ApplicationStatus::Completed, 30))
        .await;
    harness
        .backend
        .seed_application(application(owner, "bbbbbbbb-new", ApplicationStatus::Pending, 1))
        .await;
    harness
        .backend
        .seed_application(application(
            UserId::generate(),
            "cccccccc-other",
            ApplicationStatus::Pending,
            0,
        ))
        .await;
    let (name, value) = session_cookie(&session);

    let response = harness.server.get("/dashboard").add_header(name, value).await;

    response.assert_status_ok();
    let html = response.text();
    let newer = html.find("Application #bbbbbbbb").expect("newer card");
    let older = html.find("Application #aaaaaaaa").expect("older card");
    assert!(newer < older);
    assert!(!html.contains("Application #cccccccc"));
    assert_eq!(html.matches("<article").count(), 2);
}

#[tokio::test]
async fn ready_application_shows_pickup_banner() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    harness
        .backend
        .seed_application(application(
            session.user_id,
            "dddddddd-ready",
            ApplicationStatus::Ready,
            2,
        ))
        .await;
    let (name, value) = session_cookie(&session);

    let response = harness.server.get("/dashboard").add_header(name, value).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Your ID card is ready for pickup!"));
    assert!(html.contains("Visit the ICT Unit to collect your ID card."));
}

#[tokio::test]
async fn fetch_failure_renders_empty_list() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    harness
        .backend
        .seed_application(application(
            session.user_id,
            "eeeeeeee-hidden",
            ApplicationStatus::Pending,
            0,
        ))
        .await;
    harness.backend.fail_lists("connection reset").await;
    let (name, value) = session_cookie(&session);

    let response = harness.server.get("/dashboard").add_header(name, value).await;

    response.assert_status_ok();
    assert!(response.text().contains("No Applications Found"));
}

#[tokio::test]
async fn submitted_notice_shows_toast() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let (name, value) = session_cookie(&session);

    let response = harness
        .server
        .get("/dashboard?notice=submitted")
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert!(response
        .text()
        .contains("Application submitted successfully!"));
}

// ============================================================================
// Live updates
// ============================================================================

#[tokio::test]
async fn live_stream_requires_session() {
    let harness = TestHarness::new();

    let response = harness.server.get("/dashboard/events").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(harness.backend.subscriber_count(), 0);
}

#[tokio::test]
async fn live_stream_refetches_then_redirects_on_sign_out() {
    let harness = TestHarness::new();
    let session = harness.registered("amina@fulafia.edu.ng").await;
    harness
        .backend
        .seed_application(application(
            session.user_id,
            "ffffffff-live",
            ApplicationStatus::Processing,
            0,
        ))
        .await;
    let (name, value) = session_cookie(&session);

    let request = harness
        .server
        .get("/dashboard/events")
        .add_header(name, value)
        .into_future();

    let drive = async {
        wait_for_subscriber(&harness).await;
        let renewed = harness
            .backend
            .sign_in("amina@fulafia.edu.ng", "correct horse")
            .await
            .unwrap();
        // Let the stream refetch before the session goes away.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        harness.backend.sign_out(&renewed).await.unwrap();
    };

    let (response, ()) = tokio::join!(request, drive);

    response.assert_status_ok();
    let body = response.text();
    let applications = body.find("event: applications").expect("applications event");
    let redirect = body.find("event: redirect").expect("redirect event");
    assert!(applications < redirect);
    assert!(body.contains("Application #ffffffff"));
    assert!(body.contains("data: /auth"));
    assert_eq!(harness.backend.subscriber_count(), 0);
}

#[tokio::test]
async fn live_stream_returns_renewed_cookies() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let refresh = session.refresh_token.clone().expect("refresh token");
    let (name, value) =
        cookie_header(&format!("idcard_session=expired; idcard_refresh={refresh}"));

    let request = harness
        .server
        .get("/dashboard/events")
        .add_header(name, value)
        .into_future();

    let drive = async {
        wait_for_subscriber(&harness).await;
        harness.backend.sign_out(&session).await.unwrap();
    };

    let (response, ()) = tokio::join!(request, drive);

    response.assert_status_ok();
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("idcard_session=") && !c.contains("Max-Age=0")));
    assert!(cookies.iter().any(|c| c.starts_with("idcard_refresh=") && !c.contains(&refresh)));
    assert!(response.text().contains("data: /auth"));
}
