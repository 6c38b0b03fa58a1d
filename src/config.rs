//! Studio configuration, read from an optional JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{StudioError, StudioResult};
use crate::render::MissingFontPolicy;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    pub logging: LoggingConfig,
    pub fonts: FontConfig,
    pub export: ExportConfig,
    /// Extra themes appended to the built-in registry.
    pub themes_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive (e.g. `"info"`, `"social_studio=debug,warn"`).
    pub level: String,
    /// Emit structured JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Where the UI font comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub font_file: Option<PathBuf>,
    pub font_dirs: Vec<PathBuf>,
    pub system_fonts: bool,
    pub missing_font: MissingFontPolicy,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            font_file: None,
            font_dirs: Vec::new(),
            system_fonts: true,
            missing_font: MissingFontPolicy::Fail,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory the exported asset is saved into.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl StudioConfig {
    /// Read `path`. A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> StudioResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            StudioError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json(&text).map_err(|e| match e {
            StudioError::Validation(msg) => {
                StudioError::validation(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_json(text: &str) -> StudioResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| StudioError::validation(format!("invalid config: {e}")))
    }

    /// Like [`StudioConfig::load`], but logs the problem and falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
