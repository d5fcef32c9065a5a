//! Whole-document tree strategy
//!
//! Loads the document into xee's document store and selects record names
//! with an XPath expression assembled from the active criteria.

use std::path::Path;

use roster_traits::{
    AnalysisStrategy, Criteria, Error, MissingName, Result, DEPARTMENT_ATTRIBUTE,
    FACULTY_ATTRIBUTE, NAME_ELEMENT, RECORD_ELEMENT,
};
use tracing::{debug, warn};
use xee_xpath::{Documents, Queries, Query};

/// Tree strategy backed by xee XPath evaluation
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeStrategy {
    missing_name: MissingName,
}

impl TreeStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_name(missing_name: MissingName) -> Self {
        Self { missing_name }
    }

    /// The XPath expression this strategy evaluates for `criteria`
    pub fn query_for(&self, criteria: &Criteria) -> String {
        build_record_query(criteria, self.missing_name)
    }
}

impl AnalysisStrategy for TreeStrategy {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn missing_name(&self) -> MissingName {
        self.missing_name
    }

    fn analyze(&self, path: &Path, criteria: &Criteria) -> Result<Vec<String>> {
        let xml = crate::source::read_document(path)?;
        let xpath = self.query_for(criteria);
        debug!(strategy = self.name(), path = %path.display(), %xpath, "evaluating record query");

        let mut documents = Documents::new();
        let doc_handle = documents.add_string_without_uri(&xml).map_err(|e| {
            warn!(strategy = self.name(), path = %path.display(), "document failed to parse");
            Error::malformed(format!("{:?}", e))
        })?;

        let queries = Queries::default();
        let query = queries
            .sequence(&xpath)
            .map_err(|e| Error::query(format!("{:?}", e)))?;
        let sequence = query
            .execute(&mut documents, doc_handle)
            .map_err(|e| Error::query(format!("{:?}", e)))?;

        let mut names = Vec::new();
        for item in sequence.iter() {
            match item {
                xee_xpath::Item::Atomic(xee_xpath::Atomic::String(_, s)) => {
                    names.push(s.to_string())
                }
                _ => {
                    return Err(Error::query(
                        "record query produced a non-string item",
                    ))
                }
            }
        }

        debug!(strategy = self.name(), matches = names.len(), "analysis finished");
        Ok(names)
    }
}

/// Assemble `/*/Student[...]/string(Name[1])` for the given criteria.
///
/// Each present criterion adds one attribute equality to the record
/// predicate. Under `MissingName::Skip` records must also have a `Name`
/// child.
pub(crate) fn build_record_query(criteria: &Criteria, missing_name: MissingName) -> String {
    let mut conditions = Vec::new();
    if let Some(faculty) = &criteria.faculty {
        conditions.push(format!("@{}={}", FACULTY_ATTRIBUTE, string_literal(faculty)));
    }
    if let Some(department) = &criteria.department {
        conditions.push(format!(
            "@{}={}",
            DEPARTMENT_ATTRIBUTE,
            string_literal(department)
        ));
    }
    if missing_name == MissingName::Skip {
        conditions.push(NAME_ELEMENT.to_string());
    }

    let mut xpath = format!("/*/{}", RECORD_ELEMENT);
    if !conditions.is_empty() {
        xpath.push_str(&format!("[{}]", conditions.join(" and ")));
    }
    xpath.push_str(&format!("/string({}[1])", NAME_ELEMENT));
    xpath
}

/// Quote a value as an XPath string literal, doubling embedded apostrophes
fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
