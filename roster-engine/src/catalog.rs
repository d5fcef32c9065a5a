//! Faculty catalog for populating a faculty picker

use std::collections::BTreeSet;
use std::path::Path;

use roster_traits::{Error, Result};
use tracing::debug;
use xot::Xot;

use crate::strategy_declarative::{attribute, root_element, RecordNames};

/// Distinct non-empty `Faculty` values of all records, sorted ascending
pub fn faculties(path: &Path) -> Result<Vec<String>> {
    let xml = crate::source::read_document(path)?;
    faculties_from_str(&xml)
}

pub fn faculties_from_str(xml: &str) -> Result<Vec<String>> {
    let mut xot = Xot::new();
    let doc = xot.parse(xml).map_err(|e| Error::malformed(e.to_string()))?;
    let names = RecordNames::register(&mut xot);
    let root = root_element(&xot, doc)?;

    let faculties: BTreeSet<String> = xot
        .children(root)
        .filter(|n| xot.node_name(*n) == Some(names.record))
        .filter_map(|n| attribute(&xot, n, names.faculty))
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    debug!(count = faculties.len(), "collected faculties");
    Ok(faculties.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faculties_are_distinct_sorted_and_non_empty() {
        let xml = r#"<University>
            <Student Faculty="Sci"><Name>C</Name></Student>
            <Student Faculty="Eng"><Name>A</Name></Student>
            <Student Faculty=""><Name>D</Name></Student>
            <Student><Name>E</Name></Student>
            <Student Faculty="Eng"><Name>B</Name></Student>
        </University>"#;
        assert_eq!(faculties_from_str(xml).unwrap(), vec!["Eng", "Sci"]);
    }

    #[test]
    fn malformed_catalog_source() {
        let err = faculties_from_str("<University><Student>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }
}
