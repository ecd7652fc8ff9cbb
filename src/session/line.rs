use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::fonts::RenderSource;
use crate::session::clarity::ClarityParameter;
use crate::session::recorder::{JudgmentRecord, SessionRecorder};
use crate::session::rotation::{ContentRotation, RotationMode, WordCursor};

/// Index of a displayed line, zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineId(pub usize);

/// What a freeze signal does to a line that is already frozen, and whether freezing ends the
/// line at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreezePolicy {
    /// Frozen is terminal; further freeze signals are ignored.
    #[default]
    SingleShot,
    /// A second freeze unfreezes the line and retracts its record.
    Toggle,
    /// Record the judgment, then give the line a new random source at the start clarity.
    Reassign,
}

/// Clarity of a line coming back from frozen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumePolicy {
    /// Resume from the value it was frozen at.
    #[default]
    Continue,
    /// Restart from the configured start value.
    Reset,
}

/// Lifecycle state of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Decaying and rotating.
    Active,
    /// Locked; `record` is the sequence number of its judgment.
    Frozen {
        /// Sequence number in the recorder.
        record: u64,
    },
}

/// One row of evaluation.
#[derive(Clone, Debug)]
pub struct Line {
    id: LineId,
    source: Arc<RenderSource>,
    content: String,
    clarity: ClarityParameter,
    state: LineState,
    cursor: WordCursor,
}

impl Line {
    /// New active line with empty content.
    pub fn new(id: LineId, source: Arc<RenderSource>, clarity: ClarityParameter) -> Self {
        Self {
            id,
            source,
            content: String::new(),
            clarity,
            state: LineState::Active,
            cursor: WordCursor::default(),
        }
    }

    /// Line index.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Font the line is drawn with.
    pub fn source(&self) -> &Arc<RenderSource> {
        &self.source
    }

    /// Text currently shown.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current clarity.
    pub fn clarity(&self) -> &ClarityParameter {
        &self.clarity
    }

    /// Lifecycle state.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// `true` once frozen.
    pub fn is_frozen(&self) -> bool {
        matches!(self.state, LineState::Frozen { .. })
    }

    /// Manual clarity change. Returns `true` only when the value moved; frozen lines and
    /// clamped edits leave it untouched.
    pub fn adjust(&mut self, delta: f64) -> bool {
        if self.is_frozen() {
            return false;
        }
        let before = self.clarity.value();
        self.clarity.set(before + delta) != before
    }

    pub(crate) fn decay(&mut self, step: f64) {
        if !self.is_frozen() {
            self.clarity.decrease(step);
        }
    }

    /// Draw new content. Returns `false` on a frozen line.
    pub fn rotate(&mut self, rotation: &mut ContentRotation, mode: RotationMode) -> bool {
        if self.is_frozen() {
            return false;
        }
        self.content = match mode {
            RotationMode::Sentence => rotation.next().text(),
            RotationMode::Word => rotation.next_word_with(&mut self.cursor),
        };
        true
    }

    /// Lock the current `(content, source, clarity)` into a record.
    ///
    /// Returns the record's sequence number, or `None` when the line was already frozen.
    pub fn freeze(&mut self, recorder: &mut SessionRecorder) -> Option<u64> {
        if self.is_frozen() {
            return None;
        }
        let seq = recorder.record(JudgmentRecord::new(
            self.source.to_ref(),
            self.clarity.value(),
            self.content.clone(),
        ));
        self.state = LineState::Frozen { record: seq };
        tracing::info!(
            line = self.id.0,
            source = self.source.name(),
            clarity = self.clarity.value(),
            "line frozen"
        );
        Some(seq)
    }

    /// Return a frozen line to active and retract its record.
    ///
    /// Returns the retracted sequence number, or `None` when the line was active.
    pub fn unfreeze(
        &mut self,
        recorder: &mut SessionRecorder,
        resume: ResumePolicy,
        start: f64,
    ) -> Option<u64> {
        let LineState::Frozen { record } = self.state else {
            return None;
        };
        recorder.retract(record);
        if resume == ResumePolicy::Reset {
            self.clarity.set(start);
        }
        self.state = LineState::Active;
        tracing::info!(line = self.id.0, "line unfrozen");
        Some(record)
    }

    /// Give the line a new source and restart it at `start`, active.
    pub fn reassign(&mut self, source: Arc<RenderSource>, start: f64) {
        self.source = source;
        self.clarity.set(start);
        self.state = LineState::Active;
        self.cursor.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/line.rs"]
mod tests;
