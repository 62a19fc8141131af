//! Static faculty, department and level catalog.
//!
//! The department list offered on the form is a pure function of the chosen
//! faculty. `FacultySelection` holds that pair of choices and keeps them
//! consistent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A university faculty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Faculty {
    /// Faculty of Science.
    Science,
    /// Faculty of Arts.
    Arts,
    /// Faculty of Social Sciences.
    SocialSciences,
    /// Faculty of Education.
    Education,
    /// Faculty of Management Sciences.
    ManagementSciences,
    /// Faculty of Agriculture.
    Agriculture,
}

impl Faculty {
    /// All faculties in display order.
    pub const ALL: [Faculty; 6] = [
        Self::Science,
        Self::Arts,
        Self::SocialSciences,
        Self::Education,
        Self::ManagementSciences,
        Self::Agriculture,
    ];

    /// Display name, also the stored value.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Science => "Faculty of Science",
            Self::Arts => "Faculty of Arts",
            Self::SocialSciences => "Faculty of Social Sciences",
            Self::Education => "Faculty of Education",
            Self::ManagementSciences => "Faculty of Management Sciences",
            Self::Agriculture => "Faculty of Agriculture",
        }
    }

    /// Departments belonging to this faculty.
    #[must_use]
    pub const fn departments(self) -> &'static [&'static str] {
        match self {
            Self::Science => &[
                "Computer Science",
                "Mathematics",
                "Physics",
                "Chemistry",
                "Biology",
                "Microbiology",
            ],
            Self::Arts => &[
                "English Language",
                "History",
                "Islamic Studies",
                "Arabic",
                "Philosophy",
            ],
            Self::SocialSciences => &[
                "Economics",
                "Political Science",
                "Sociology",
                "Geography",
                "Psychology",
            ],
            Self::Education => &[
                "Educational Foundations",
                "Science Education",
                "Arts Education",
                "Educational Management",
            ],
            Self::ManagementSciences => &[
                "Accounting",
                "Business Administration",
                "Banking and Finance",
                "Marketing",
            ],
            Self::Agriculture => &[
                "Agronomy",
                "Animal Science",
                "Crop Protection",
                "Agricultural Economics",
            ],
        }
    }

    /// Look up one of this faculty's departments by name.
    #[must_use]
    pub fn department(self, name: &str) -> Option<&'static str> {
        self.departments().iter().copied().find(|d| *d == name)
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Faculty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ValidationError::UnknownFaculty(s.to_string()))
    }
}

impl TryFrom<String> for Faculty {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Faculty> for String {
    fn from(faculty: Faculty) -> Self {
        faculty.name().to_string()
    }
}

/// Year of study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    /// 100 level.
    L100,
    /// 200 level.
    L200,
    /// 300 level.
    L300,
    /// 400 level.
    L400,
    /// 500 level.
    L500,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 5] = [Self::L100, Self::L200, Self::L300, Self::L400, Self::L500];

    /// Stored value (`"100"` .. `"500"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L100 => "100",
            Self::L200 => "200",
            Self::L300 => "300",
            Self::L400 => "400",
            Self::L500 => "500",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownLevel(s.to_string()))
    }
}

impl TryFrom<String> for Level {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

/// Faculty and department choice on the application form.
///
/// The department control is disabled and empty until a faculty is chosen.
/// Switching faculty drops a department that the new faculty does not offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FacultySelection {
    faculty: Option<Faculty>,
    department: Option<&'static str>,
}

impl FacultySelection {
    /// Nothing chosen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            faculty: None,
            department: None,
        }
    }

    /// Rebuild a selection from raw form values, dropping whatever does not
    /// fit the catalog.
    #[must_use]
    pub fn from_raw(faculty: &str, department: &str) -> Self {
        let mut selection = Self::new();
        if let Ok(faculty) = faculty.parse() {
            selection.select_faculty(Some(faculty));
            selection.select_department(department);
        }
        selection
    }

    /// Currently selected faculty.
    #[must_use]
    pub const fn faculty(&self) -> Option<Faculty> {
        self.faculty
    }

    /// Currently selected department.
    #[must_use]
    pub const fn department(&self) -> Option<&'static str> {
        self.department
    }

    /// Change the faculty, clearing a department it does not offer.
    pub fn select_faculty(&mut self, faculty: Option<Faculty>) {
        self.faculty = faculty;
        self.department = match (faculty, self.department) {
            (Some(f), Some(d)) => f.department(d),
            _ => None,
        };
    }

    /// Choose a department. Returns `false` (and leaves the selection alone)
    /// when the current faculty does not offer it.
    pub fn select_department(&mut self, name: &str) -> bool {
        match self.faculty.and_then(|f| f.department(name)) {
            Some(d) => {
                self.department = Some(d);
                true
            }
            None => false,
        }
    }

    /// Whether the department control accepts input.
    #[must_use]
    pub const fn department_enabled(&self) -> bool {
        self.faculty.is_some()
    }

    /// Options for the department control.
    #[must_use]
    pub fn department_options(&self) -> &'static [&'static str] {
        match self.faculty {
            Some(faculty) => faculty.departments(),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_faculties_with_round_trippable_names() {
        assert_eq!(Faculty::ALL.len(), 6);
        for faculty in Faculty::ALL {
            assert_eq!(faculty.name().parse::<Faculty>().unwrap(), faculty);
            assert!(!faculty.departments().is_empty());
        }
    }

    #[test]
    fn unset_faculty_disables_departments() {
        let selection = FacultySelection::new();
        assert!(!selection.department_enabled());
        assert!(selection.department_options().is_empty());
    }

    #[test]
    fn selecting_faculty_populates_its_exact_departments() {
        for faculty in Faculty::ALL {
            let mut selection = FacultySelection::new();
            selection.select_faculty(Some(faculty));
            assert!(selection.department_enabled());
            assert_eq!(selection.department_options(), faculty.departments());
        }
    }

    #[test]
    fn switching_faculty_clears_foreign_department() {
        let mut selection = FacultySelection::new();
        selection.select_faculty(Some(Faculty::Science));
        assert!(selection.select_department("Physics"));

        selection.select_faculty(Some(Faculty::Arts));
        assert_eq!(selection.department(), None);
        assert_eq!(selection.faculty(), Some(Faculty::Arts));
    }

    #[test]
    fn reselecting_same_faculty_keeps_department() {
        let mut selection = FacultySelection::new();
        selection.select_faculty(Some(Faculty::Agriculture));
        selection.select_department("Agronomy");
        selection.select_faculty(Some(Faculty::Agriculture));
        assert_eq!(selection.department(), Some("Agronomy"));
    }

    #[test]
    fn clearing_faculty_clears_department() {
        let mut selection = FacultySelection::from_raw("Faculty of Education", "Arts Education");
        assert_eq!(selection.department(), Some("Arts Education"));
        selection.select_faculty(None);
        assert_eq!(selection.department(), None);
        assert!(!selection.department_enabled());
    }

    #[test]
    fn department_outside_faculty_is_refused() {
        let mut selection = FacultySelection::new();
        assert!(!selection.select_department("Physics"));

        selection.select_faculty(Some(Faculty::ManagementSciences));
        assert!(!selection.select_department("Physics"));
        assert_eq!(selection.department(), None);
    }

    #[test]
    fn levels_parse_from_stored_values() {
        assert_eq!("300".parse::<Level>().unwrap(), Level::L300);
        assert!("600".parse::<Level>().is_err());
        assert_eq!(Level::ALL.map(Level::as_str), ["100", "200", "300", "400", "500"]);
    }
}
