//! Serializable analysis report

use chrono::{DateTime, Utc};
use roster_traits::{Criteria, MissingName};
use serde::{Deserialize, Serialize};

/// Outcome of one analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub strategy: String,
    pub criteria: Criteria,
    pub missing_name: MissingName,
    pub names: Vec<String>,
    pub count: usize,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(
        strategy: &str,
        criteria: Criteria,
        missing_name: MissingName,
        names: Vec<String>,
    ) -> Self {
        Self {
            strategy: strategy.to_string(),
            criteria,
            missing_name,
            count: names.len(),
            names,
            generated_at: Utc::now(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
