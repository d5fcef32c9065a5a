//! Faculty and department filter criteria

use serde::{Deserialize, Serialize};
use std::fmt;

/// Faculty picker entry meaning "no faculty constraint"
pub const ALL_FACULTIES: &str = "All";

/// Optional faculty/department constraints for one request.
///
/// `None` means the field is unconstrained. It is not the same as
/// `Some("")`, which only matches an attribute whose value is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criteria {
    pub faculty: Option<String>,
    pub department: Option<String>,
}

impl Criteria {
    /// Criteria matching every record
    pub fn any() -> Self {
        Self::default()
    }

    pub fn new(faculty: Option<String>, department: Option<String>) -> Self {
        Self { faculty, department }
    }

    pub fn with_faculty<S: Into<String>>(mut self, faculty: S) -> Self {
        self.faculty = Some(faculty.into());
        self
    }

    pub fn with_department<S: Into<String>>(mut self, department: S) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Build criteria from form-style input.
    ///
    /// Blank fields and the `"All"` faculty entry become "no constraint",
    /// the way the roster picker hands them over.
    pub fn from_user_input(faculty: Option<&str>, department: Option<&str>) -> Self {
        let faculty = faculty
            .map(str::trim)
            .filter(|f| !f.is_empty() && *f != ALL_FACULTIES);
        let department = department.map(str::trim).filter(|d| !d.is_empty());
        Self {
            faculty: faculty.map(str::to_string),
            department: department.map(str::to_string),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.faculty.is_none() && self.department.is_none()
    }

    pub fn faculty_matches(&self, value: Option<&str>) -> bool {
        field_matches(self.faculty.as_deref(), value)
    }

    pub fn department_matches(&self, value: Option<&str>) -> bool {
        field_matches(self.department.as_deref(), value)
    }

    /// Check a record's attribute values against both constraints
    pub fn matches(&self, faculty: Option<&str>, department: Option<&str>) -> bool {
        self.faculty_matches(faculty) && self.department_matches(department)
    }
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faculty = self.faculty.as_deref().unwrap_or("*");
        let department = self.department.as_deref().unwrap_or("*");
        write!(f, "faculty={} department={}", faculty, department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_criterion_matches_anything() {
        let c = Criteria::any();
        assert!(c.matches(None, None));
        assert!(c.matches(Some("Eng"), Some("")));
    }

    #[test]
    fn present_criterion_is_exact_and_case_sensitive() {
        let c = Criteria::any().with_faculty("Eng");
        assert!(c.faculty_matches(Some("Eng")));
        assert!(!c.faculty_matches(Some("eng")));
        assert!(!c.faculty_matches(Some("Eng ")));
        assert!(!c.faculty_matches(None));
    }

    #[test]
    fn empty_string_is_not_absent() {
        let c = Criteria::any().with_department("");
        assert!(c.department_matches(Some("")));
        assert!(!c.department_matches(None));
        assert!(!c.department_matches(Some("CS")));
    }

    #[test]
    fn user_input_normalises_blank_and_all() {
        let c = Criteria::from_user_input(Some(ALL_FACULTIES), Some("   "));
        assert!(c.is_unconstrained());

        let c = Criteria::from_user_input(Some(" Eng "), Some("CS"));
        assert_eq!(c, Criteria::any().with_faculty("Eng").with_department("CS"));
    }

    #[test]
    fn display_marks_unconstrained_fields() {
        let c = Criteria::any().with_department("CS");
        assert_eq!(c.to_string(), "faculty=* department=CS");
    }
}
