//! roster-engine: student roster filtering with interchangeable strategies
//!
//! This library reads a `<University><Student .../></University>` style
//! document and returns the names of students matching optional faculty and
//! department criteria, using a tree, streaming or declarative strategy.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use roster_engine::{Backend, Criteria, MissingName, StrategyContext};
//!
//! let mut ctx = StrategyContext::new();
//! ctx.set_strategy(Backend::Stream.strategy(MissingName::Empty));
//! let names = ctx.execute_strategy(path, &Criteria::any().with_faculty("Eng"))?;
//! ```

pub mod catalog;
pub mod config;
pub mod context;
pub mod report;
mod source;

pub mod strategy_declarative;
pub mod strategy_stream;
pub mod strategy_tree;

pub mod unified;

// Re-export core types
pub use roster_traits::{AnalysisStrategy, Criteria, Error, MissingName, Result};

pub use config::Settings;
pub use context::{StrategyContext, NO_STRATEGY_SENTINEL};
pub use report::AnalysisReport;
pub use strategy_declarative::DeclarativeStrategy;
pub use strategy_stream::StreamStrategy;
pub use strategy_tree::TreeStrategy;

// Re-export unified API
pub use unified::{compare_backends, Backend, Comparison, RosterEngine};
