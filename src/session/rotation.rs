use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::assets::corpus::TextUnit;
use crate::foundation::error::{LegibilityError, LegibilityResult};

/// Characters stripped from both ends of words handed out one at a time.
const WORD_TRIM: &[char] = &['"', '\u{201C}', '\u{201D}'];

/// How often an active line's content changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// A whole sentence, resampled on every tick.
    #[default]
    Sentence,
    /// One word per tick, in order; a new sentence is drawn only once the current one is used up.
    Word,
}

/// Position inside the sentence a line is reading word by word.
#[derive(Clone, Debug, Default)]
pub struct WordCursor {
    unit: Option<usize>,
    next: usize,
}

impl WordCursor {
    /// Index of the unit being read, if any.
    pub fn unit(&self) -> Option<usize> {
        self.unit
    }

    /// Forget the current unit so the next word starts a fresh draw.
    pub fn clear(&mut self) {
        self.unit = None;
        self.next = 0;
    }
}

/// Pool of text units with uniform random draws.
///
/// Draws are with replacement: the same unit may come back later in a session. Only the
/// word-by-word cursor guarantees a unit is finished before another starts.
#[derive(Debug)]
pub struct ContentRotation {
    units: Vec<TextUnit>,
    rng: StdRng,
    cursor: WordCursor,
}

impl ContentRotation {
    /// Fails with [`LegibilityError::CorpusTooSmall`] when `units` is empty.
    pub fn new(units: Vec<TextUnit>, min_tokens: usize, rng: StdRng) -> LegibilityResult<Self> {
        let units: Vec<TextUnit> = units
            .into_iter()
            .filter(|u| u.len() >= min_tokens.max(1))
            .collect();
        if units.is_empty() {
            return Err(LegibilityError::CorpusTooSmall { min_tokens });
        }
        Ok(Self {
            units,
            rng,
            cursor: WordCursor::default(),
        })
    }

    /// All units.
    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    /// Uniformly random unit.
    pub fn next(&mut self) -> TextUnit {
        let i = self.draw_index();
        self.units[i].clone()
    }

    /// Next word using the rotation's own cursor.
    pub fn next_word(&mut self) -> String {
        let mut cursor = std::mem::take(&mut self.cursor);
        let word = self.next_word_with(&mut cursor);
        self.cursor = cursor;
        word
    }

    /// Next word for an externally owned cursor, so several lines can each read their own
    /// sentence.
    pub fn next_word_with(&mut self, cursor: &mut WordCursor) -> String {
        // Bounded so a unit made only of quote marks cannot spin forever.
        for _ in 0..=self.units.len() * 4 {
            let unit = match cursor.unit {
                Some(u) if cursor.next < self.units[u].len() => u,
                _ => {
                    let u = self.draw_index();
                    cursor.unit = Some(u);
                    cursor.next = 0;
                    u
                }
            };
            let token = &self.units[unit].tokens()[cursor.next];
            cursor.next += 1;
            let word = token.trim_matches(WORD_TRIM);
            if !word.is_empty() {
                return word.to_string();
            }
        }
        cursor.clear();
        String::new()
    }

    /// Reset the built-in cursor.
    pub fn reset_cursor(&mut self) {
        self.cursor.clear();
    }

    fn draw_index(&mut self) -> usize {
        self.rng.gen_range(0..self.units.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/rotation.rs"]
mod tests;
