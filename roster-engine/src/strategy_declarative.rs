//! Declarative pipeline strategy
//!
//! Loads the document with xot and narrows an iterator of record nodes
//! with one filter per present criterion before projecting names.

use std::path::Path;

use roster_traits::{
    AnalysisStrategy, Criteria, Error, MissingName, Result, DEPARTMENT_ATTRIBUTE,
    FACULTY_ATTRIBUTE, NAME_ELEMENT, RECORD_ELEMENT,
};
use tracing::{debug, warn};
use xot::{NameId, Node, Xot};

/// Declarative strategy built from composed iterator adapters
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarativeStrategy {
    missing_name: MissingName,
}

impl DeclarativeStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_name(missing_name: MissingName) -> Self {
        Self { missing_name }
    }
}

impl AnalysisStrategy for DeclarativeStrategy {
    fn name(&self) -> &'static str {
        "declarative"
    }

    fn missing_name(&self) -> MissingName {
        self.missing_name
    }

    fn analyze(&self, path: &Path, criteria: &Criteria) -> Result<Vec<String>> {
        debug!(strategy = self.name(), path = %path.display(), %criteria, "starting analysis");
        let xml = crate::source::read_document(path)?;

        let mut xot = Xot::new();
        let doc = xot.parse(&xml).map_err(|e| {
            warn!(strategy = self.name(), path = %path.display(), "document failed to parse");
            Error::malformed(e.to_string())
        })?;
        let names = RecordNames::register(&mut xot);
        let xot = &xot;
        let root = root_element(xot, doc)?;

        let mut records: Box<dyn Iterator<Item = Node> + '_> =
            Box::new(xot.children(root).filter(move |n| xot.node_name(*n) == Some(names.record)));
        if let Some(wanted) = criteria.faculty.as_deref() {
            records = Box::new(
                records.filter(move |n| attribute(xot, *n, names.faculty) == Some(wanted)),
            );
        }
        if let Some(wanted) = criteria.department.as_deref() {
            records = Box::new(
                records.filter(move |n| attribute(xot, *n, names.department) == Some(wanted)),
            );
        }

        let policy = self.missing_name;
        let result: Vec<String> = records
            .filter_map(|record| policy.resolve(name_text(xot, record, names.name)))
            .collect();

        debug!(strategy = self.name(), matches = result.len(), "analysis finished");
        Ok(result)
    }
}

/// Interned names of the record shape
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordNames {
    pub(crate) record: NameId,
    pub(crate) name: NameId,
    pub(crate) faculty: NameId,
    pub(crate) department: NameId,
}

impl RecordNames {
    pub(crate) fn register(xot: &mut Xot) -> Self {
        Self {
            record: xot.add_name(RECORD_ELEMENT),
            name: xot.add_name(NAME_ELEMENT),
            faculty: xot.add_name(FACULTY_ATTRIBUTE),
            department: xot.add_name(DEPARTMENT_ATTRIBUTE),
        }
    }
}

/// The single element child of the document node
pub(crate) fn root_element(xot: &Xot, doc: Node) -> Result<Node> {
    xot.children(doc)
        .find(|n| xot.is_element(*n))
        .ok_or_else(|| Error::malformed("document has no root element"))
}

pub(crate) fn attribute(xot: &Xot, node: Node, name: NameId) -> Option<&str> {
    xot.get_attribute(node, name).map(|v| &v[..])
}

/// String value of the record's first `Name` child, if it has one
fn name_text(xot: &Xot, record: Node, name: NameId) -> Option<String> {
    xot.children(record)
        .find(|n| xot.node_name(*n) == Some(name))
        .map(|n| xot.string_value(n))
}
