use std::path::PathBuf;

/// Convenience result type used across the engine.
pub type LegibilityResult<T> = Result<T, LegibilityError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum LegibilityError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A candidate render source could not be opened or parsed.
    ///
    /// Non-fatal during pool building: the candidate is excluded and logged.
    #[error("failed to load render source '{}': {reason}", path.display())]
    SourceLoad {
        /// Path of the failing candidate.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// No candidate survived font validation; a session cannot start.
    #[error("no render source passed validation ({candidates} candidates inspected)")]
    EmptyValidatedPool {
        /// Number of candidates that were inspected.
        candidates: usize,
    },

    /// The corpus yielded no text unit with enough tokens.
    #[error("corpus has no text unit with at least {min_tokens} tokens")]
    CorpusTooSmall {
        /// Minimum token count that was required.
        min_tokens: usize,
    },

    /// Rasterization failed inside a render backend.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LegibilityError {
    /// Build a [`LegibilityError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LegibilityError::SourceLoad`] value.
    pub fn source_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`LegibilityError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LegibilityError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
