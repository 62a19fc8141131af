//! Application form handlers.

use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;

use idcard_core::{ApplicationForm, FacultySelection};

use crate::error::PageError;
use crate::notice::{Notice, NoticeQuery, Toast};
use crate::session::SessionUser;
use crate::state::AppState;
use crate::submission::{self, FileUpload, SubmitError, Submission};
use crate::views;

/// `GET /apply`
pub async fn apply_page(user: SessionUser, Query(query): Query<NoticeQuery>) -> Response {
    let html = views::apply::render(&ApplicationForm::default(), query.toast().as_ref());
    (user.renewed_cookies(), Html(html)).into_response()
}

/// Faculty whose departments are wanted.
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentsQuery {
    /// Faculty display name.
    #[serde(default)]
    pub faculty: String,
}

/// `GET /apply/departments?faculty=...` - department options as a JSON
/// array; empty for an unknown or missing faculty.
pub async fn departments(Query(query): Query<DepartmentsQuery>) -> Json<Vec<&'static str>> {
    let selection = FacultySelection::from_raw(query.faculty.trim(), "");
    Json(selection.department_options().to_vec())
}

/// `POST /apply` - validate, upload both files, insert the record.
///
/// The session gate runs before the body is read, so nothing is uploaded
/// for a visitor without a session.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let (form, passport, signature) = read_form(multipart).await?;

    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(e) => {
            tracing::debug!(user_id = %user.user_id(), error = %e, "Application form rejected");
            let html = views::apply::render(&form, Some(&Toast::error(e.to_string())));
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                user.renewed_cookies(),
                Html(html),
            )
                .into_response());
        }
    };

    let submission = Submission {
        form: validated,
        passport,
        signature,
    };

    match submission::submit_detached(state, user.session.clone(), submission).await {
        Ok(_) => Ok((
            user.renewed_cookies(),
            Redirect::to(&Notice::Submitted.on("/dashboard")),
        )
            .into_response()),
        Err(SubmitError::Unexpected(message)) => Err(PageError::Internal(message)),
        Err(e) => {
            let html = views::apply::render(&form, Some(&Toast::error(e.user_message())));
            Ok((StatusCode::BAD_GATEWAY, user.renewed_cookies(), Html(html)).into_response())
        }
    }
}

async fn read_form(
    mut multipart: Multipart,
) -> Result<(ApplicationForm, Option<FileUpload>, Option<FileUpload>), PageError> {
    let mut form = ApplicationForm::default();
    let mut passport = None;
    let mut signature = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "fullName" => form.full_name = field.text().await?,
            "matricNumber" => form.matric_number = field.text().await?,
            "faculty" => form.faculty = field.text().await?,
            "department" => form.department = field.text().await?,
            "level" => form.level = field.text().await?,
            "passport" => passport = read_file(field).await?,
            "signature" => signature = read_file(field).await?,
            _ => {}
        }
    }

    form.has_passport = passport.is_some();
    form.has_signature = signature.is_some();
    Ok((form, passport, signature))
}

/// A file input left empty arrives with an empty file name.
async fn read_file(field: Field<'_>) -> Result<Option<FileUpload>, PageError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    if file_name.is_empty() {
        return Ok(None);
    }

    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await?;

    Ok(Some(FileUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}
