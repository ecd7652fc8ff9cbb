use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{LegibilityError, LegibilityResult};
use crate::session::eval_session::SessionConfig;
use crate::validate::validator::ValidatorConfig;

/// Top-level engine configuration, usually loaded from JSON.
///
/// Every field has a default, so `{}` is a valid file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directories scanned (non-recursively) for font candidates.
    pub font_dirs: Vec<PathBuf>,
    /// Plain-text corpus; `None` uses the built-in passage.
    pub corpus_path: Option<PathBuf>,
    /// Font validity thresholds.
    pub validator: ValidatorConfig,
    /// Session behaviour.
    pub session: SessionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            font_dirs: default_font_dirs(),
            corpus_path: None,
            validator: ValidatorConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from any JSON reader.
    pub fn from_reader<R: Read>(r: R) -> LegibilityResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LegibilityError::serde(format!("parse engine config JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LegibilityResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LegibilityError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section.
    pub fn validate(&self) -> LegibilityResult<()> {
        if self.font_dirs.is_empty() {
            return Err(LegibilityError::validation(
                "at least one font directory is required",
            ));
        }
        self.validator.validate()?;
        self.session.validate()
    }
}

/// System font locations for macOS and common Linux layouts, plus the user's own font folder.
///
/// Family subfolders one level down (`Supplemental`, `truetype/dejavu`) are picked up by the scan.
pub fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/usr/share/fonts/truetype"),
        PathBuf::from("/usr/share/fonts/opentype"),
        PathBuf::from("/usr/share/fonts/TTF"),
        PathBuf::from("/usr/share/fonts/OTF"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join("Library/Fonts"));
        dirs.push(home.join(".local/share/fonts"));
    }
    dirs
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
