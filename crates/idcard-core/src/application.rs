//! Application record types.
//!
//! Field names match the `applications` table columns so the types can be
//! sent to and read from the record store directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Faculty, Level};
use crate::status::ApplicationStatus;
use crate::UserId;

/// Length of the id prefix shown on dashboard cards.
const SHORT_ID_LEN: usize = 8;

/// A stored ID card application.
///
/// Once created the portal never modifies or deletes a record; status
/// changes are made by staff outside the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Store-assigned identifier.
    pub id: String,

    /// Owner of the application.
    pub user_id: UserId,

    /// Matriculation number, free-form.
    pub matric_number: String,

    /// Faculty display name.
    pub faculty: String,

    /// Department display name.
    pub department: String,

    /// Level (`"100"` .. `"500"`).
    pub level: String,

    /// Public URL of the passport photograph.
    #[serde(default)]
    pub passport_photo_url: Option<String>,

    /// Public URL of the signature image.
    #[serde(default)]
    pub signature_url: Option<String>,

    /// Lifecycle status.
    #[serde(default)]
    pub status: ApplicationStatus,

    /// When the store accepted the record.
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// First eight characters of the id, for display.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id
            .char_indices()
            .nth(SHORT_ID_LEN)
            .map_or(self.id.as_str(), |(idx, _)| &self.id[..idx])
    }
}

/// Insert payload for a new application.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    /// Owner of the application.
    pub user_id: UserId,
    /// Matriculation number.
    pub matric_number: String,
    /// Faculty.
    pub faculty: Faculty,
    /// Department, guaranteed to belong to `faculty`.
    pub department: String,
    /// Level.
    pub level: Level,
    /// Public URL of the uploaded passport photograph.
    pub passport_photo_url: Option<String>,
    /// Public URL of the uploaded signature.
    pub signature_url: Option<String>,
    /// Always `Pending` for new records.
    pub status: ApplicationStatus,
}

impl NewApplication {
    /// Turn the insert payload into the record the store would return.
    #[must_use]
    pub fn into_application(self, id: String, created_at: DateTime<Utc>) -> Application {
        Application {
            id,
            user_id: self.user_id,
            matric_number: self.matric_number,
            faculty: self.faculty.name().to_string(),
            department: self.department,
            level: self.level.as_str().to_string(),
            passport_photo_url: self.passport_photo_url,
            signature_url: self.signature_url,
            status: self.status,
            created_at,
        }
    }
}
