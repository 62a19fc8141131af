//! Application submission: upload both files, then insert the record.
//!
//! The steps run strictly in order. When a later step fails, objects
//! already uploaded by this submission are removed again so a failed
//! attempt leaves no orphaned files behind.
//!
//! [`submit_detached`] runs the whole sequence on its own task. If the
//! visitor navigates away mid-way the request future is dropped, but the
//! task still finishes (or compensates) and its result is discarded.

use std::sync::Arc;

use chrono::Utc;

use idcard_backend::{BackendError, ObjectStorage, RecordStore, Session};
use idcard_core::{object_name, Application, Bucket, ValidatedForm};

use crate::state::AppState;

/// An uploaded file taken from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Name of the file on the student's machine.
    pub file_name: String,
    /// MIME type reported by the browser.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// A validated application with its files.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Validated form values.
    pub form: ValidatedForm,
    /// Passport photograph.
    pub passport: Option<FileUpload>,
    /// Signature image.
    pub signature: Option<FileUpload>,
}

/// Why a submission failed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A file could not be stored.
    #[error("upload to {bucket} failed: {source}")]
    Upload {
        /// Target bucket.
        bucket: Bucket,
        /// Underlying failure.
        source: BackendError,
    },

    /// The record could not be inserted.
    #[error("insert failed: {0}")]
    Insert(BackendError),

    /// The submission task itself failed.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl SubmitError {
    /// Toast text for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Upload { bucket, .. } => bucket.failure_message().to_string(),
            Self::Insert(err) => {
                format!("Failed to submit application: {}", err.user_message())
            }
            Self::Unexpected(_) => "An unexpected error occurred".to_string(),
        }
    }
}

/// Run the submission on a separate task and wait for its outcome.
pub async fn submit_detached(
    state: Arc<AppState>,
    session: Session,
    submission: Submission,
) -> Result<Application, SubmitError> {
    let task = tokio::spawn(async move {
        submit(
            state.storage.as_ref(),
            state.records.as_ref(),
            &session,
            submission,
        )
        .await
    });

    match task.await {
        Ok(result) => result,
        Err(e) => Err(SubmitError::Unexpected(e.to_string())),
    }
}

/// Upload the passport photo, then the signature, then insert the record.
pub async fn submit(
    storage: &dyn ObjectStorage,
    records: &dyn RecordStore,
    session: &Session,
    submission: Submission,
) -> Result<Application, SubmitError> {
    let user_id = session.user_id;
    let mut uploaded: Vec<(Bucket, String)> = Vec::with_capacity(2);

    let steps = [
        (Bucket::PassportPhotos, submission.passport),
        (Bucket::Signatures, submission.signature),
    ];

    let mut urls = Vec::with_capacity(2);
    for (bucket, file) in steps {
        let Some(file) = file else {
            urls.push(None);
            continue;
        };

        let name = object_name(user_id, Utc::now(), &file.file_name);
        if let Err(source) = storage
            .upload(session, bucket, &name, file.bytes, &file.content_type)
            .await
        {
            tracing::warn!(%user_id, %bucket, error = %source, "Upload failed");
            compensate(storage, session, &uploaded).await;
            return Err(SubmitError::Upload { bucket, source });
        }

        tracing::debug!(%user_id, %bucket, object = %name, "Uploaded");
        urls.push(Some(storage.public_url(bucket, &name)));
        uploaded.push((bucket, name));
    }

    let mut urls = urls.into_iter();
    let passport_url = urls.next().flatten();
    let signature_url = urls.next().flatten();

    let application = submission
        .form
        .into_new_application(user_id, passport_url, signature_url);

    match records.insert(session, &application).await {
        Ok(stored) => {
            tracing::info!(%user_id, application_id = %stored.id, "Application submitted");
            Ok(stored)
        }
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "Insert failed");
            compensate(storage, session, &uploaded).await;
            Err(SubmitError::Insert(e))
        }
    }
}

/// Remove objects uploaded by a failed submission. Best effort.
async fn compensate(storage: &dyn ObjectStorage, session: &Session, uploaded: &[(Bucket, String)]) {
    for (bucket, name) in uploaded {
        if let Err(e) = storage.remove(session, *bucket, name).await {
            tracing::warn!(%bucket, object = %name, error = %e, "Failed to remove orphaned upload");
        }
    }
}
