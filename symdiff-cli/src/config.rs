//! SymDiff configuration loading from `.symdiff.toml`.
//!
//! Configuration is optional - symdiff uses sensible defaults if no config
//! file exists in the working directory.
//!
//! # Example Configuration
//!
//! ```toml
//! [output]
//! format = "table"
//! color = true
//!
//! [filter]
//! include_internal = false
//! internal_patterns = ["^Generated\\."]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Root configuration structure loaded from `.symdiff.toml`.
///
/// All sections are optional and default when not specified.
#[derive(Debug, Deserialize, Default)]
pub struct SymdiffConfig {
    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Declaration filtering configuration.
    #[serde(default)]
    pub filter: FilterSettings,
}

/// Output formatting preferences.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format when no --format flag is given.
    #[serde(default)]
    pub format: Option<String>,

    /// Force colored output on or off; unset means auto-detect.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Declaration filtering configuration.
#[derive(Debug, Deserialize, Default)]
pub struct FilterSettings {
    /// Include auto-generated declarations by default.
    #[serde(default)]
    pub include_internal: bool,

    /// Extra internal-name regex patterns on top of the built-in heuristics.
    #[serde(default)]
    pub internal_patterns: Vec<String>,
}

impl SymdiffConfig {
    /// Load configuration from `<root>/.symdiff.toml`.
    ///
    /// A missing file yields defaults; a malformed file is warned about and
    /// ignored.
    pub fn load(root: &Path) -> Self {
        let path = root.join(".symdiff.toml");
        match fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!("ignoring malformed {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    pub fn include_internal(&self) -> bool {
        self.filter.include_internal
    }

    pub fn internal_patterns(&self) -> &[String] {
        &self.filter.internal_patterns
    }
}
