//! Configuration management for sheetcycle.
//!
//! Column and separator choices can live in a YAML file so repeated runs
//! over the same workbook need no flags or prompts:
//!
//! ```yaml
//! source-column: Task
//! target-column: Depends On
//! separator: semicolon
//! ```
//!
//! Values given on the command line take precedence over the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sheetcycle_graph::Separator;

use crate::error::{Error, Result};
use crate::workbook::same_column;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sheetcycle.yaml";

/// Column and separator choices. Every field is optional so that a file, the
/// command line and interactive prompts can each fill in part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Header of the item-name column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_column: Option<String>,

    /// Header of the dependency column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,

    /// How multi-value dependency cells are split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<Separator>,
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or is not valid
    /// settings YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Parse settings from YAML text. An empty document yields defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_yaml` error for malformed YAML, unknown keys or an
    /// unknown separator name.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] in `dir`
    /// when it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the chosen file cannot be loaded. An
    /// explicit path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading config file");
            return Self::load(path);
        }

        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "Loading config file");
            return Self::load(&default_path);
        }

        Ok(Self::default())
    }

    /// Fill unset fields from `self` with values from `overrides`, preferring
    /// `overrides` wherever both are set.
    #[must_use]
    pub fn merged_with(self, overrides: Self) -> Self {
        Self {
            source_column: overrides.source_column.or(self.source_column),
            target_column: overrides.target_column.or(self.target_column),
            separator: overrides.separator.or(self.separator),
        }
    }
}

/// Fully resolved choices, ready to drive a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Header of the item-name column.
    pub source_column: String,
    /// Header of the dependency column.
    pub target_column: String,
    /// How multi-value dependency cells are split.
    pub separator: Separator,
}

impl TryFrom<Settings> for Selection {
    type Error = Error;

    /// Resolve without prompting: both columns are required and the
    /// separator defaults to a comma.
    fn try_from(settings: Settings) -> Result<Self> {
        let source_column = settings.source_column.ok_or_else(|| {
            Error::Config("--source is required when not running interactively".into())
        })?;
        let target_column = settings.target_column.ok_or_else(|| {
            Error::Config("--target is required when not running interactively".into())
        })?;
        ensure_distinct_columns(&source_column, &target_column)?;
        Ok(Self {
            source_column,
            target_column,
            separator: settings.separator.unwrap_or_default(),
        })
    }
}

/// Reject a source and target that name the same column.
///
/// Every row would otherwise link an item to itself.
pub(crate) fn ensure_distinct_columns(source: &str, target: &str) -> Result<()> {
    if same_column(source, target) {
        return Err(Error::Config(format!(
            "source and target columns must differ (both are '{}')",
            target.trim()
        )));
    }
    Ok(())
}
