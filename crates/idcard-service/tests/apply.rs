//! Application form integration tests.

mod common;

use std::future::IntoFuture;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;

use common::{application_form, location, session_cookie, TestHarness};
use idcard_backend::AuthProvider;
use idcard_core::{ApplicationStatus, Bucket};

// ============================================================================
// Session gate
// ============================================================================

#[tokio::test]
async fn form_requires_session() {
    let harness = TestHarness::new();

    let response = harness.server.get("/apply").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth");
}

#[tokio::test]
async fn submit_without_session_uploads_nothing() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/apply")
        .multipart(application_form())
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth");
    assert!(harness.backend.applications().await.is_empty());
    assert!(harness.backend.objects_in(Bucket::PassportPhotos).await.is_empty());
}

#[tokio::test]
async fn form_renders_with_department_disabled() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let (name, value) = session_cookie(&session);

    let response = harness.server.get("/apply").add_header(name, value).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("ID Card Application"));
    assert!(html.contains(r#"name="department" required disabled"#));
}

// ============================================================================
// Department options
// ============================================================================

#[tokio::test]
async fn departments_of_a_faculty() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/apply/departments")
        .add_query_param("faculty", "Faculty of Agriculture")
        .await;

    response.assert_status_ok();
    let departments: Vec<String> = response.json();
    assert_eq!(
        departments,
        [
            "Agronomy",
            "Animal Science",
            "Crop Protection",
            "Agricultural Economics"
        ]
    );
}

#[tokio::test]
async fn departments_of_unknown_faculty_are_empty() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/apply/departments")
        .add_query_param("faculty", "Faculty of Medicine")
        .await;

    response.assert_status_ok();
    let departments: Vec<String> = response.json();
    assert!(departments.is_empty());
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn successful_submission_redirects_to_dashboard() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let (name, value) = session_cookie(&session);

    let response = harness
        .server
        .post("/apply")
        .add_header(name, value)
        .multipart(application_form())
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard?notice=submitted");

    let applications = harness.backend.applications().await;
    assert_eq!(applications.len(), 1);
    let stored = &applications[0];
    assert_eq!(stored.user_id, session.user_id);
    assert_eq!(stored.status, ApplicationStatus::Pending);
    assert_eq!(stored.matric_number, "FUL/SCI/20/0042");
    assert_eq!(stored.faculty, "Faculty of Science");
    assert_eq!(stored.department, "Computer Science");
    assert_eq!(stored.level, "300");

    let passports = harness.backend.objects_in(Bucket::PassportPhotos).await;
    assert_eq!(passports.len(), 1);
    assert!(passports[0].starts_with(&format!("{}-", session.user_id)));
    assert!(passports[0].ends_with(".jpg"));
    let object = harness
        .backend
        .object(Bucket::PassportPhotos, &passports[0])
        .await
        .unwrap();
    assert_eq!(object.content_type, "image/jpeg");
    assert_eq!(object.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);

    let signatures = harness.backend.objects_in(Bucket::Signatures).await;
    assert_eq!(signatures.len(), 1);
    assert!(signatures[0].ends_with(".png"));
    assert!(stored
        .signature_url
        .as_deref()
        .is_some_and(|url| url.ends_with(&signatures[0])));
}

#[tokio::test]
async fn missing_field_redraws_form_without_uploading() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let (name, value) = session_cookie(&session);

    let form = MultipartForm::new()
        .add_text("fullName", "Amina Bello")
        .add_text("matricNumber", "   ")
        .add_text("faculty", "Faculty of Science")
        .add_text("department", "Physics")
        .add_text("level", "200");

    let response = harness
        .server
        .post("/apply")
        .add_header(name, value)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("Matriculation number is required"));
    assert!(html.contains(r#"value="Amina Bello""#));
    assert!(html.contains(r#"<option value="Physics" selected>"#));
    assert!(harness.backend.applications().await.is_empty());
    assert!(harness.backend.objects_in(Bucket::PassportPhotos).await.is_empty());
}

#[tokio::test]
async fn department_from_another_faculty_is_rejected() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    let (name, value) = session_cookie(&session);

    let form = application_form().add_text("department", "History");

    let response = harness
        .server
        .post("/apply")
        .add_header(name, value)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .text()
        .contains("History is not a department of the Faculty of Science"));
    assert!(harness.backend.applications().await.is_empty());
}

#[tokio::test]
async fn passport_upload_failure_inserts_nothing() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    harness.backend.fail_uploads_to(Bucket::PassportPhotos).await;
    let (name, value) = session_cookie(&session);

    let response = harness
        .server
        .post("/apply")
        .add_header(name, value)
        .multipart(application_form())
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let html = response.text();
    assert!(html.contains("Failed to upload passport photo"));
    assert!(html.contains(r#"value="FUL/SCI/20/0042""#));
    assert!(harness.backend.applications().await.is_empty());
    assert!(harness.backend.objects_in(Bucket::Signatures).await.is_empty());
}

#[tokio::test]
async fn insert_failure_removes_uploads() {
    let harness = TestHarness::new();
    let session = harness.session().await;
    harness
        .backend
        .fail_inserts("new row violates row-level security policy")
        .await;
    let (name, value) = session_cookie(&session);

    let response = harness
        .server
        .post("/apply")
        .add_header(name, value)
        .multipart(application_form())
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(response.text().contains(
        "Failed to submit application: new row violates row-level security policy"
    ));
    assert!(harness.backend.objects_in(Bucket::PassportPhotos).await.is_empty());
    assert!(harness.backend.objects_in(Bucket::Signatures).await.is_empty());
}

// ============================================================================
// Sign-out while the form is open
// ============================================================================

#[tokio::test]
async fn session_stream_requires_session() {
    let harness = TestHarness::new();

    let response = harness.server.get("/session/events").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth");
    assert_eq!(harness.backend.subscriber_count(), 0);
}

#[tokio::test]
async fn open_form_is_sent_to_login_on_sign_out() {
    let harness = TestHarness::new();
    let session = harness.registered("amina@fulafia.edu.ng").await;
    let (name, value) = session_cookie(&session);

    let form = harness
        .server
        .get("/apply")
        .add_header(name.clone(), value.clone())
        .await;
    form.assert_status_ok();
    assert!(form.text().contains("/session/events"));

    let request = harness
        .server
        .get("/session/events")
        .add_header(name, value)
        .into_future();

    let drive = async {
        while harness.backend.subscriber_count() == 0 {
            tokio::task::yield_now().await;
        }
        // A sign-in elsewhere does not close the form.
        harness
            .backend
            .sign_in("amina@fulafia.edu.ng", "correct horse")
            .await
            .unwrap();
        harness.backend.sign_out(&session).await.unwrap();
    };

    let (response, ()) = tokio::join!(request, drive);

    response.assert_status_ok();
    let body = response.text();
    assert_eq!(body.matches("event: redirect").count(), 1);
    assert!(body.contains("data: /auth"));
    assert_eq!(harness.backend.subscriber_count(), 0);
}
