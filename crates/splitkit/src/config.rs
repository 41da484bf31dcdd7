#![forbid(unsafe_code)]

//! File and string configuration for splitkit components.
//!
//! ```toml
//! # splitkit.toml
//! [split_pane]
//! orientation = "horizontal"
//! initial_size = 280
//! min_size = 120
//!
//! [panes.inspector]
//! orientation = "vertical"
//! initial_size = 40
//! unit = "percent"
//!
//! [tab_strip]
//! page_fraction = 0.75
//! gap = 4
//! ```
//!
//! ```rust,ignore
//! let config = UiConfig::from_toml_file("splitkit.toml")?.validated()?;
//! let pane = SplitPane::mount(
//!     SplitPaneProps::new(sidebar, editor, config.pane("inspector").clone()),
//!     &document,
//! );
//! ```
//!
//! Every field has a default, so an empty document is a valid config.
//! Out-of-range values load successfully and are clamped when used;
//! [`UiConfig::validate`] lists them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use splitkit_layout::SplitPaneConfig;
use splitkit_widgets::TabStripConfig;

/// Configuration for every splitkit component in an application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Defaults for split panes without a named entry.
    pub split_pane: SplitPaneConfig,
    /// Named split pane overrides.
    pub panes: BTreeMap<String, SplitPaneConfig>,
    pub tab_strip: TabStripConfig,
}

impl UiConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }

    /// Config for the pane called `name`, falling back to `split_pane`.
    #[must_use]
    pub fn pane(&self, name: &str) -> &SplitPaneConfig {
        self.panes.get(name).unwrap_or(&self.split_pane)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.split_pane.validate();
        for (name, pane) in &self.panes {
            errors.extend(
                pane.validate()
                    .into_iter()
                    .map(|error| format!("panes.{name}: {error}")),
            );
        }
        errors.extend(self.tab_strip.validate());
        errors
    }

    /// Return the config if it validates, or every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            tracing::debug!(
                message = "config.invalid",
                count = errors.len(),
                first = %errors[0]
            );
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// TOML serialization error.
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::TomlSerialize(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
