//! Application form input and required-field validation.

use serde::{Deserialize, Serialize};

use crate::application::NewApplication;
use crate::catalog::{Faculty, FacultySelection, Level};
use crate::error::ValidationError;
use crate::status::ApplicationStatus;
use crate::UserId;

/// Raw values submitted on the application form.
///
/// Kept as entered so the form can be redrawn with them after a failed
/// submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    /// Full name (collected, not stored).
    pub full_name: String,
    /// Matriculation number.
    pub matric_number: String,
    /// Faculty display name.
    pub faculty: String,
    /// Department display name.
    pub department: String,
    /// Level value.
    pub level: String,
    /// Whether a passport photograph was attached.
    pub has_passport: bool,
    /// Whether a signature image was attached.
    pub has_signature: bool,
}

/// Form values that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    /// Full name.
    pub full_name: String,
    /// Matriculation number.
    pub matric_number: String,
    /// Faculty.
    pub faculty: Faculty,
    /// Department belonging to `faculty`.
    pub department: &'static str,
    /// Level.
    pub level: Level,
}

impl ApplicationForm {
    /// The faculty/department pair as the form would show it.
    #[must_use]
    pub fn selection(&self) -> FacultySelection {
        FacultySelection::from_raw(self.faculty.trim(), self.department.trim())
    }

    /// Check every required field and the faculty/department pairing.
    ///
    /// Fields are checked in form order; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        let full_name = required(&self.full_name, "Full name")?;
        let matric_number = required(&self.matric_number, "Matriculation number")?;
        let faculty: Faculty = required(&self.faculty, "Faculty")?.parse()?;

        let department_name = required(&self.department, "Department")?;
        let department =
            faculty
                .department(&department_name)
                .ok_or_else(|| ValidationError::DepartmentMismatch {
                    faculty: faculty.name().to_string(),
                    department: department_name.clone(),
                })?;

        let level: Level = required(&self.level, "Level")?.parse()?;

        if !self.has_passport {
            return Err(ValidationError::Required("Passport photo"));
        }
        if !self.has_signature {
            return Err(ValidationError::Required("Signature"));
        }

        Ok(ValidatedForm {
            full_name,
            matric_number,
            faculty,
            department,
            level,
        })
    }
}

impl ValidatedForm {
    /// Build the insert payload with the resolved upload URLs.
    #[must_use]
    pub fn into_new_application(
        self,
        user_id: UserId,
        passport_photo_url: Option<String>,
        signature_url: Option<String>,
    ) -> NewApplication {
        NewApplication {
            user_id,
            matric_number: self.matric_number,
            faculty: self.faculty,
            department: self.department.to_string(),
            level: self.level,
            passport_photo_url,
            signature_url,
            status: ApplicationStatus::Pending,
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ApplicationForm {
        ApplicationForm {
            full_name: "Amina Bello".into(),
            matric_number: " FUL/2024/001 ".into(),
            faculty: "Faculty of Science".into(),
            department: "Computer Science".into(),
            level: "100".into(),
            has_passport: true,
            has_signature: true,
        }
    }

    #[test]
    fn complete_form_validates_and_trims() {
        let form = filled().validate().unwrap();
        assert_eq!(form.matric_number, "FUL/2024/001");
        assert_eq!(form.faculty, Faculty::Science);
        assert_eq!(form.department, "Computer Science");
        assert_eq!(form.level, Level::L100);
    }

    #[test]
    fn blank_fields_are_reported_in_form_order() {
        let mut form = filled();
        form.full_name = "   ".into();
        form.level = String::new();
        assert_eq!(form.validate(), Err(ValidationError::Required("Full name")));
    }

    #[test]
    fn department_must_belong_to_faculty() {
        let mut form = filled();
        form.faculty = "Faculty of Agriculture".into();
        let err = form.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Computer Science is not a department of the Faculty of Agriculture"
        );
    }

    #[test]
    fn unknown_level_is_rejected() {
        let mut form = filled();
        form.level = "700".into();
        assert_eq!(form.validate(), Err(ValidationError::UnknownLevel("700".into())));
    }

    #[test]
    fn both_files_are_required() {
        let mut form = filled();
        form.has_signature = false;
        assert_eq!(form.validate(), Err(ValidationError::Required("Signature")));

        form.has_passport = false;
        assert_eq!(form.validate(), Err(ValidationError::Required("Passport photo")));
    }

    #[test]
    fn new_application_starts_pending() {
        let user = UserId::generate();
        let app = filled().validate().unwrap().into_new_application(
            user,
            Some("p".into()),
            Some("s".into()),
        );
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.user_id, user);
        assert_eq!(app.department, "Computer Science");
    }

    #[test]
    fn selection_reflects_entered_values() {
        let mut form = filled();
        form.department = "History".into();
        let selection = form.selection();
        assert_eq!(selection.faculty(), Some(Faculty::Science));
        assert_eq!(selection.department(), None);
    }
}
