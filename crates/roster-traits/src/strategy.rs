//! Analysis strategy abstraction trait

use crate::criteria::Criteria;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Element name of a student record
pub const RECORD_ELEMENT: &str = "Student";
/// Element name of a record's name child
pub const NAME_ELEMENT: &str = "Name";
/// Record attribute holding the faculty
pub const FACULTY_ATTRIBUTE: &str = "Faculty";
/// Record attribute holding the department
pub const DEPARTMENT_ATTRIBUTE: &str = "Department";

/// What a matching record without a `Name` element contributes.
///
/// A present but empty `<Name/>` always contributes an empty string;
/// this policy only covers records where the element is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingName {
    /// Contribute an empty string
    #[default]
    #[serde(alias = "empty-string")]
    Empty,
    /// Contribute nothing
    Skip,
}

impl MissingName {
    /// Resolve a record's captured name into its result entry
    pub fn resolve(self, name: Option<String>) -> Option<String> {
        match (name, self) {
            (Some(name), _) => Some(name),
            (None, MissingName::Empty) => Some(String::new()),
            (None, MissingName::Skip) => None,
        }
    }
}

impl fmt::Display for MissingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingName::Empty => f.write_str("empty"),
            MissingName::Skip => f.write_str("skip"),
        }
    }
}

impl FromStr for MissingName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" | "empty-string" => Ok(MissingName::Empty),
            "skip" => Ok(MissingName::Skip),
            other => Err(format!("unknown missing-name policy '{}'", other)),
        }
    }
}

/// Trait for roster traversal strategies.
///
/// Records are the `Student` elements directly under the document's root
/// element. Implementations return the names of matching records in
/// document order and must agree with each other on every well-formed
/// document.
///
/// Note: This trait does not require Send + Sync. Callers sharing a
/// strategy across threads should serialize access themselves.
pub trait AnalysisStrategy {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Policy applied to matching records that lack a `Name` element
    fn missing_name(&self) -> MissingName;

    /// Read the document at `path` and return the names of matching records
    fn analyze(&self, path: &Path, criteria: &Criteria) -> Result<Vec<String>>;
}
