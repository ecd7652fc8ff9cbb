use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{LegibilityError, LegibilityResult};
use crate::session::line::{Line, LineId};

/// Cadence of the decay scheduler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Render tick interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Minimum time between two automatic decrements of the same line, in milliseconds.
    pub decay_interval_ms: u64,
    /// Amount removed by one automatic decrement.
    pub decay_step: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 300,
            decay_interval_ms: 1000,
            decay_step: 0.1,
        }
    }
}

impl SchedulerConfig {
    /// Intervals must be non-zero and the step positive.
    pub fn validate(&self) -> LegibilityResult<()> {
        if self.tick_interval_ms == 0 || self.decay_interval_ms == 0 {
            return Err(LegibilityError::validation(
                "tick and decay intervals must be > 0",
            ));
        }
        if !self.decay_step.is_finite() || self.decay_step <= 0.0 {
            return Err(LegibilityError::validation("decay_step must be > 0"));
        }
        Ok(())
    }

    /// Tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Decay interval as a [`Duration`].
    pub fn decay_interval(&self) -> Duration {
        Duration::from_millis(self.decay_interval_ms)
    }
}

/// Decides when the next tick is due.
///
/// A late poll fires once and re-bases the deadline on the poll time, so missed ticks are
/// dropped rather than replayed.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    /// First tick is due one interval after `start`.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start + interval,
        }
    }

    /// `true` when a tick should run at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    /// Deadline of the next tick.
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Time left until the next tick, zero if overdue.
    pub fn time_until(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Lines whose clarity was decremented.
    pub decayed: Vec<LineId>,
    /// Lines to redraw, decayed or not.
    pub rerender: Vec<LineId>,
}

/// Automatic clarity decay for every registered, unfrozen line.
///
/// Each line keeps its own decay clock. Decay always reads the line's current value, so a
/// manual edit made between ticks is the base for the next decrement.
#[derive(Clone, Debug)]
pub struct DecayScheduler {
    decay_interval: Duration,
    decay_step: f64,
    last_decay: BTreeMap<LineId, Instant>,
}

impl DecayScheduler {
    /// Scheduler with no registered lines.
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            decay_interval: config.decay_interval(),
            decay_step: config.decay_step,
            last_decay: BTreeMap::new(),
        }
    }

    /// Add `line` to the active set, starting its decay clock at `now`.
    pub fn register(&mut self, line: LineId, now: Instant) {
        self.last_decay.insert(line, now);
    }

    /// Remove `line` from the active set.
    pub fn unregister(&mut self, line: LineId) {
        self.last_decay.remove(&line);
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.last_decay.clear();
    }

    /// `true` while `line` is in the active set.
    pub fn is_active(&self, line: LineId) -> bool {
        self.last_decay.contains_key(&line)
    }

    /// Run one tick over `lines`.
    pub fn tick(&mut self, now: Instant, lines: &mut [Line]) -> TickOutcome {
        let mut out = TickOutcome::default();
        for line in lines.iter_mut() {
            if line.is_frozen() {
                continue;
            }
            let Some(last) = self.last_decay.get_mut(&line.id()) else {
                continue;
            };
            let elapsed = now.saturating_duration_since(*last);
            if elapsed >= self.decay_interval {
                // Keep the clock on its own grid so the tick period does not stretch the decay
                // rate; a tick more than one interval late re-bases instead of catching up.
                if elapsed >= self.decay_interval * 2 {
                    *last = now;
                } else {
                    *last += self.decay_interval;
                }
                if !line.clarity().is_at_min() {
                    line.decay(self.decay_step);
                    out.decayed.push(line.id());
                }
            }
            out.rerender.push(line.id());
        }
        tracing::debug!(
            decayed = out.decayed.len(),
            rerender = out.rerender.len(),
            "decay tick"
        );
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
