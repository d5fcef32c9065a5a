//! Strategy context holding the currently bound strategy

use std::path::Path;

use roster_traits::{AnalysisStrategy, Criteria, Error, Result};
use tracing::debug;

/// Message returned by [`StrategyContext::execute_or_sentinel`] when no
/// strategy is bound
pub const NO_STRATEGY_SENTINEL: &str = "Error: Strategy not set.";

/// Holds zero or one strategy and forwards analysis requests to it
#[derive(Default)]
pub struct StrategyContext {
    strategy: Option<Box<dyn AnalysisStrategy>>,
}

impl StrategyContext {
    /// Create a context with no strategy bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with `strategy` already bound
    pub fn with_strategy(strategy: Box<dyn AnalysisStrategy>) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    /// Bind `strategy`, replacing any previously bound one
    pub fn set_strategy(&mut self, strategy: Box<dyn AnalysisStrategy>) {
        debug!(strategy = strategy.name(), "binding strategy");
        self.strategy = Some(strategy);
    }

    /// Unbind the current strategy, returning it
    pub fn clear_strategy(&mut self) -> Option<Box<dyn AnalysisStrategy>> {
        self.strategy.take()
    }

    /// Name of the bound strategy
    pub fn strategy_name(&self) -> Option<&'static str> {
        self.strategy.as_ref().map(|s| s.name())
    }

    /// Run the bound strategy, failing with `NoStrategyBound` when there is none
    pub fn execute_strategy(&self, path: &Path, criteria: &Criteria) -> Result<Vec<String>> {
        let strategy = self.strategy.as_ref().ok_or(Error::NoStrategyBound)?;
        strategy.analyze(path, criteria)
    }

    /// Legacy calling convention: an unbound context yields a one-element
    /// list holding [`NO_STRATEGY_SENTINEL`] instead of an error.
    pub fn execute_or_sentinel(&self, path: &Path, criteria: &Criteria) -> Result<Vec<String>> {
        match self.execute_strategy(path, criteria) {
            Err(Error::NoStrategyBound) => Ok(vec![NO_STRATEGY_SENTINEL.to_string()]),
            other => other,
        }
    }
}

impl std::fmt::Debug for StrategyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyContext")
            .field("strategy", &self.strategy_name())
            .finish()
    }
}
