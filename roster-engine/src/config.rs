//! Settings loaded from an optional TOML file

use std::path::Path;

use roster_traits::{AnalysisStrategy, Error, MissingName, Result};
use serde::{Deserialize, Serialize};

use crate::unified::Backend;

/// Roster analysis settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Strategy used when the caller does not pick one
    #[serde(default)]
    pub strategy: Backend,

    /// Contribution of matching records without a `Name` element
    #[serde(default)]
    pub missing_name: MissingName,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategy: Backend::default(),
            missing_name: MissingName::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Strategy described by these settings
    pub fn build_strategy(&self) -> Box<dyn AnalysisStrategy> {
        self.strategy.strategy(self.missing_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.strategy, Backend::Tree);
        assert_eq!(settings.missing_name, MissingName::Empty);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn fields_and_aliases_parse() {
        let settings = Settings::from_toml_str(
            r#"
strategy = "sax"
missing_name = "skip"
log_level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(settings.strategy, Backend::Stream);
        assert_eq!(settings.missing_name, MissingName::Skip);
        assert_eq!(settings.build_strategy().name(), "stream");
    }

    #[test]
    fn unknown_strategy_is_config_error() {
        let err = Settings::from_toml_str(r#"strategy = "xslt""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
