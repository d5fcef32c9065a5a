//! Core contract for student roster traversal strategies.
//!
//! This crate defines the criteria, error type and strategy trait that
//! every roster traversal implementation shares.

pub mod criteria;
pub mod error;
pub mod strategy;

pub use criteria::{Criteria, ALL_FACULTIES};
pub use error::{Error, Result};
pub use strategy::{
    AnalysisStrategy, MissingName, DEPARTMENT_ATTRIBUTE, FACULTY_ATTRIBUTE, NAME_ELEMENT,
    RECORD_ELEMENT,
};
