//! Error types for the portal core.

/// A single rejected form field.
///
/// The messages are shown to the student as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was left blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// Faculty is not in the catalog.
    #[error("unknown faculty: {0}")]
    UnknownFaculty(String),

    /// Department is not offered by the chosen faculty.
    #[error("{department} is not a department of the {faculty}")]
    DepartmentMismatch {
        /// Chosen faculty.
        faculty: String,
        /// Chosen department.
        department: String,
    },

    /// Level is not one of 100..500.
    #[error("unknown level: {0}")]
    UnknownLevel(String),
}
