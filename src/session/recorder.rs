use serde::Serialize;

use crate::assets::fonts::SourceRef;
use crate::foundation::error::{LegibilityError, LegibilityResult};

/// A judgment captured when a line was frozen. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JudgmentRecord {
    seq: u64,
    source: SourceRef,
    clarity_at_freeze: f64,
    content: String,
}

impl JudgmentRecord {
    /// Unsequenced record; the recorder assigns the sequence number.
    pub fn new(source: SourceRef, clarity_at_freeze: f64, content: String) -> Self {
        Self {
            seq: 0,
            source,
            clarity_at_freeze,
            content,
        }
    }

    /// Insertion sequence number, starting at 1.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Source the sample was drawn in.
    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    /// Clarity value at the moment of the freeze.
    pub fn clarity_at_freeze(&self) -> f64 {
        self.clarity_at_freeze
    }

    /// Text shown when frozen.
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Serialize)]
struct SessionReport<'a> {
    records: Vec<&'a JudgmentRecord>,
    ranked: Vec<&'a JudgmentRecord>,
}

/// Ordered list of judgments with a ranked view.
#[derive(Clone, Debug, Default)]
pub struct SessionRecorder {
    records: Vec<JudgmentRecord>,
    next_seq: u64,
}

impl SessionRecorder {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` and return its sequence number.
    pub fn record(&mut self, mut record: JudgmentRecord) -> u64 {
        self.next_seq += 1;
        record.seq = self.next_seq;
        self.records.push(record);
        self.next_seq
    }

    /// Remove the record with sequence `seq`. Used only when a line is unfrozen.
    pub(crate) fn retract(&mut self, seq: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.seq != seq);
        before != self.records.len()
    }

    /// Records in insertion order.
    pub fn all_records(&self) -> &[JudgmentRecord] {
        &self.records
    }

    /// Records by descending clarity; ties keep insertion order.
    pub fn ranked_view(&self) -> Vec<&JudgmentRecord> {
        let mut out: Vec<&JudgmentRecord> = self.records.iter().collect();
        out.sort_by(|a, b| b.clarity_at_freeze.total_cmp(&a.clarity_at_freeze));
        out
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. Sequence numbers keep increasing.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Serialize insertion order and ranking as pretty JSON.
    pub fn to_json(&self) -> LegibilityResult<String> {
        let report = SessionReport {
            records: self.records.iter().collect(),
            ranked: self.ranked_view(),
        };
        serde_json::to_string_pretty(&report).map_err(|e| LegibilityError::serde(e.to_string()))
    }
}

/// Plain-text listing, one `"<rank>. Source: <name>, Clarity: <value>"` line per record.
pub fn export_lines<'a>(records: impl IntoIterator<Item = &'a JudgmentRecord>) -> Vec<String> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. Source: {}, Clarity: {:.1}",
                i + 1,
                r.source.name,
                r.clarity_at_freeze
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/session/recorder.rs"]
mod tests;
