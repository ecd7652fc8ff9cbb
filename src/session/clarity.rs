use serde::{Deserialize, Serialize};

use crate::foundation::error::{LegibilityError, LegibilityResult};

/// Range and stepping of the clarity parameter. Higher values are blurrier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarityConfig {
    /// Sharpest value.
    pub min: f64,
    /// Most obscured value.
    pub max: f64,
    /// Value new lines start at; `None` means `max`.
    pub start: Option<f64>,
    /// Size of one manual increase or decrease.
    pub manual_step: f64,
    /// Values are rounded to this many decimals after every mutation.
    pub resolution_decimals: u32,
}

impl Default for ClarityConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 6.0,
            start: None,
            manual_step: 0.1,
            resolution_decimals: 1,
        }
    }
}

impl ClarityConfig {
    /// Check range ordering, start placement and step sign.
    pub fn validate(&self) -> LegibilityResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(LegibilityError::validation(
                "clarity min and max must be finite with min < max",
            ));
        }
        let start = self.start_value();
        if !(self.min..=self.max).contains(&start) {
            return Err(LegibilityError::validation(
                "clarity start must lie within [min, max]",
            ));
        }
        if !self.manual_step.is_finite() || self.manual_step <= 0.0 {
            return Err(LegibilityError::validation("manual_step must be > 0"));
        }
        if self.resolution_decimals > 6 {
            return Err(LegibilityError::validation(
                "resolution_decimals must be <= 6",
            ));
        }
        Ok(())
    }

    /// Effective start value.
    pub fn start_value(&self) -> f64 {
        self.start.unwrap_or(self.max)
    }

    /// Fresh parameter at the start value.
    pub fn parameter(&self) -> LegibilityResult<ClarityParameter> {
        ClarityParameter::new(
            self.min,
            self.max,
            self.start_value(),
            self.resolution_decimals,
        )
    }
}

/// A bounded scalar. Every mutation rounds to the configured resolution and clamps into
/// `[min, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClarityParameter {
    value: f64,
    min: f64,
    max: f64,
    scale: f64,
}

impl ClarityParameter {
    /// Construct with `value` clamped into range.
    pub fn new(min: f64, max: f64, value: f64, resolution_decimals: u32) -> LegibilityResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(LegibilityError::validation(
                "clarity bounds must be finite with min <= max",
            ));
        }
        let mut out = Self {
            value: min,
            min,
            max,
            scale: 10f64.powi(resolution_decimals as i32),
        };
        out.set(value);
        Ok(out)
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// True when no further decrease is possible.
    pub fn is_at_min(&self) -> bool {
        self.value <= self.min
    }

    /// Set, round and clamp. Non-finite input leaves the value unchanged.
    pub fn set(&mut self, value: f64) -> f64 {
        if value.is_finite() {
            let rounded = (value * self.scale).round() / self.scale;
            self.value = rounded.clamp(self.min, self.max);
        }
        self.value
    }

    /// Move up by `step`.
    pub fn increase(&mut self, step: f64) -> f64 {
        self.set(self.value + step)
    }

    /// Move down by `step`.
    pub fn decrease(&mut self, step: f64) -> f64 {
        self.set(self.value - step)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/clarity.rs"]
mod tests;
