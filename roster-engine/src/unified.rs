//! Unified engine with runtime strategy selection
//!
//! Provides a single `RosterEngine` type that can run any strategy
//! (tree, stream, declarative) with the same API, selectable at runtime.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use roster_traits::{AnalysisStrategy, Criteria, Error, MissingName, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::strategy_declarative::DeclarativeStrategy;
use crate::strategy_stream::StreamStrategy;
use crate::strategy_tree::TreeStrategy;

/// Strategy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Whole-document tree with an XPath record query
    #[default]
    #[serde(alias = "dom")]
    Tree,
    /// Forward-only event stream
    #[serde(alias = "sax")]
    Stream,
    /// Composed iterator pipeline over a tree
    #[serde(alias = "linq")]
    Declarative,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Tree, Backend::Stream, Backend::Declarative];

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Tree => "tree",
            Backend::Stream => "stream",
            Backend::Declarative => "declarative",
        }
    }

    /// Build a boxed strategy for binding into a context
    pub fn strategy(self, missing_name: MissingName) -> Box<dyn AnalysisStrategy> {
        match self {
            Backend::Tree => Box::new(TreeStrategy::with_missing_name(missing_name)),
            Backend::Stream => Box::new(StreamStrategy::with_missing_name(missing_name)),
            Backend::Declarative => Box::new(DeclarativeStrategy::with_missing_name(missing_name)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tree" | "dom" => Ok(Backend::Tree),
            "stream" | "sax" => Ok(Backend::Stream),
            "declarative" | "linq" => Ok(Backend::Declarative),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

/// Unified roster engine with runtime strategy selection
#[derive(Debug, Clone, Copy)]
pub enum RosterEngine {
    Tree(TreeStrategy),
    Stream(StreamStrategy),
    Declarative(DeclarativeStrategy),
}

impl RosterEngine {
    /// Create a new engine with the tree strategy
    pub fn tree() -> Self {
        Self::Tree(TreeStrategy::new())
    }

    /// Create a new engine with the streaming strategy
    pub fn stream() -> Self {
        Self::Stream(StreamStrategy::new())
    }

    /// Create a new engine with the declarative strategy
    pub fn declarative() -> Self {
        Self::Declarative(DeclarativeStrategy::new())
    }

    /// Create a new engine with the specified backend and missing-name policy
    pub fn with_backend(backend: Backend, missing_name: MissingName) -> Self {
        match backend {
            Backend::Tree => Self::Tree(TreeStrategy::with_missing_name(missing_name)),
            Backend::Stream => Self::Stream(StreamStrategy::with_missing_name(missing_name)),
            Backend::Declarative => {
                Self::Declarative(DeclarativeStrategy::with_missing_name(missing_name))
            }
        }
    }

    /// Get the current backend
    pub fn backend(&self) -> Backend {
        match self {
            Self::Tree(_) => Backend::Tree,
            Self::Stream(_) => Backend::Stream,
            Self::Declarative(_) => Backend::Declarative,
        }
    }
}

impl Default for RosterEngine {
    /// Default to the tree strategy
    fn default() -> Self {
        Self::tree()
    }
}

impl AnalysisStrategy for RosterEngine {
    fn name(&self) -> &'static str {
        match self {
            Self::Tree(s) => s.name(),
            Self::Stream(s) => s.name(),
            Self::Declarative(s) => s.name(),
        }
    }

    fn missing_name(&self) -> MissingName {
        match self {
            Self::Tree(s) => s.missing_name(),
            Self::Stream(s) => s.missing_name(),
            Self::Declarative(s) => s.missing_name(),
        }
    }

    fn analyze(&self, path: &Path, criteria: &Criteria) -> Result<Vec<String>> {
        match self {
            Self::Tree(s) => s.analyze(path, criteria),
            Self::Stream(s) => s.analyze(path, criteria),
            Self::Declarative(s) => s.analyze(path, criteria),
        }
    }
}

/// Results of running every backend over the same input
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub results: Vec<(Backend, Vec<String>)>,
}

impl Comparison {
    /// True when every backend returned the same ordered names
    pub fn agrees(&self) -> bool {
        self.results
            .windows(2)
            .all(|pair| pair[0].1 == pair[1].1)
    }

    /// Backends whose result differs from the first backend's
    pub fn disagreeing(&self) -> Vec<Backend> {
        let Some((_, reference)) = self.results.first() else {
            return Vec::new();
        };
        self.results
            .iter()
            .filter(|(_, names)| names != reference)
            .map(|(backend, _)| *backend)
            .collect()
    }
}

/// Run all three backends and collect their results.
///
/// Fails with the first backend error; a document one strategy rejects is
/// rejected by all of them.
pub fn compare_backends(
    path: &Path,
    criteria: &Criteria,
    missing_name: MissingName,
) -> Result<Comparison> {
    let mut results = Vec::with_capacity(Backend::ALL.len());
    for backend in Backend::ALL {
        let names = RosterEngine::with_backend(backend, missing_name).analyze(path, criteria)?;
        results.push((backend, names));
    }
    let comparison = Comparison { results };
    info!(path = %path.display(), agrees = comparison.agrees(), "compared strategies");
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_and_aliases() {
        assert_eq!("DOM".parse::<Backend>().unwrap(), Backend::Tree);
        assert_eq!("sax".parse::<Backend>().unwrap(), Backend::Stream);
        assert_eq!("Linq".parse::<Backend>().unwrap(), Backend::Declarative);
        assert_eq!("declarative".parse::<Backend>().unwrap(), Backend::Declarative);
        assert!(matches!(
            "xslt".parse::<Backend>(),
            Err(Error::UnknownBackend(name)) if name == "xslt"
        ));
    }

    #[test]
    fn engine_reports_backend_and_policy() {
        for backend in Backend::ALL {
            let engine = RosterEngine::with_backend(backend, MissingName::Skip);
            assert_eq!(engine.backend(), backend);
            assert_eq!(engine.name(), backend.as_str());
            assert_eq!(engine.missing_name(), MissingName::Skip);
            assert_eq!(backend.strategy(MissingName::Skip).name(), backend.as_str());
        }
    }

    #[test]
    fn comparison_flags_disagreement() {
        let comparison = Comparison {
            results: vec![
                (Backend::Tree, vec!["A".into()]),
                (Backend::Stream, vec![]),
                (Backend::Declarative, vec!["A".into()]),
            ],
        };
        assert!(!comparison.agrees());
        assert_eq!(comparison.disagreeing(), vec![Backend::Stream]);
    }
}
