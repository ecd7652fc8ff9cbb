use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::validate::validator::{Rejection, Verdict};

/// File extensions accepted as font candidates.
pub const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// Validation state of a [`RenderSource`].
#[derive(Clone, Debug, PartialEq)]
pub enum Validity {
    /// Not inspected yet.
    Unknown,
    /// Passed the font validator.
    Valid,
    /// Failed the font validator for the given reason.
    Invalid(Rejection),
}

/// One candidate font file.
///
/// The validation state moves from [`Validity::Unknown`] exactly once; later verdicts are
/// ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSource {
    path: PathBuf,
    name: String,
    validity: Validity,
}

impl RenderSource {
    /// Unvalidated candidate for `path`. The display name is the file name up to its first dot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self {
            path,
            name,
            validity: Validity::Unknown,
        }
    }

    /// Candidate with an explicit display name.
    pub fn named(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            validity: Validity::Unknown,
        }
    }

    /// Font file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name used in records and exports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current validation state.
    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    /// True once the validator accepted this source.
    pub fn is_valid(&self) -> bool {
        matches!(self.validity, Validity::Valid)
    }

    /// Apply a validator verdict. Sources that were already judged keep their state.
    pub fn with_verdict(mut self, verdict: Verdict) -> Self {
        if self.validity == Validity::Unknown {
            self.validity = match verdict {
                Verdict::Accepted => Validity::Valid,
                Verdict::Rejected(reason) => Validity::Invalid(reason),
            };
        }
        self
    }

    /// Serializable reference used by judgment records.
    pub fn to_ref(&self) -> SourceRef {
        SourceRef {
            name: self.name.clone(),
            path: self.path.clone(),
        }
    }
}

/// Lightweight, serializable identity of a render source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    /// Display name.
    pub name: String,
    /// Font file path.
    pub path: PathBuf,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.split('.').next())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

fn has_font_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    FONT_EXTENSIONS.contains(&ext.as_str())
}

/// Discover candidate font files in `dirs`.
///
/// Each directory is scanned together with its immediate subdirectories, which is how system
/// font roots group families (`truetype/dejavu/...`). Files are sorted by path within each
/// directory; a file reached through two listed directories is reported once. Unreadable
/// directories are skipped with a warning.
pub fn list_candidate_sources(dirs: &[PathBuf]) -> Vec<RenderSource> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for dir in dirs {
        let Some((files, subdirs)) = read_font_dir(dir) else {
            continue;
        };
        let mut found = files;
        for sub in subdirs {
            if let Some((nested, _)) = read_font_dir(&sub) {
                found.extend(nested);
            }
        }
        found.retain(|path| seen.insert(path.clone()));
        tracing::info!(dir = %dir.display(), fonts = found.len(), "searched font directory");
        out.extend(found.into_iter().map(RenderSource::new));
    }
    out
}

/// Sorted font files and sorted subdirectories of `dir`.
fn read_font_dir(dir: &Path) -> Option<(Vec<PathBuf>, Vec<PathBuf>)> {
    let rd = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping font directory");
            return None;
        }
    };
    let (mut files, mut subdirs) = (Vec::new(), Vec::new());
    for path in rd.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            subdirs.push(path);
        } else if path.is_file() && has_font_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    subdirs.sort();
    Some((files, subdirs))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
