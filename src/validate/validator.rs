use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::assets::fonts::RenderSource;
use crate::foundation::error::{LegibilityError, LegibilityResult};
use crate::render::backend::TextRenderer;
use crate::render::raster::{Raster, WHITE};

/// Tunable thresholds of the font validity heuristic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Characters drawn into the probe. Must contain an ASCII letter, a non-ASCII letter and a
    /// digit so fonts with partial coverage are caught.
    pub probe_chars: String,
    /// Edge length of each square probe cell, also the font size.
    pub probe_size_px: u32,
    /// A cell with fewer inked pixels than this fraction is near-empty.
    pub min_ink_fraction: f64,
    /// Minimum number of distinct channel values across the whole probe.
    pub min_distinct_values: usize,
    /// Background the renderer draws on.
    pub background_rgba: [u8; 4],
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            probe_chars: "AÖ1".to_string(),
            probe_size_px: 30,
            min_ink_fraction: 0.10,
            min_distinct_values: 10,
            background_rgba: WHITE,
        }
    }
}

impl ValidatorConfig {
    /// Check ranges and probe coverage.
    pub fn validate(&self) -> LegibilityResult<()> {
        if self.probe_size_px == 0 {
            return Err(LegibilityError::validation("probe_size_px must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.min_ink_fraction) {
            return Err(LegibilityError::validation(
                "min_ink_fraction must be within [0, 1]",
            ));
        }
        // Distinct values are counted over channel bytes, so more than 256 can never be met.
        if self.min_distinct_values > 256 {
            return Err(LegibilityError::validation(
                "min_distinct_values must be <= 256",
            ));
        }
        let chars: Vec<char> = self.probe_chars.chars().collect();
        let has_ascii_letter = chars.iter().any(|c| c.is_ascii_alphabetic());
        let has_extended_letter = chars.iter().any(|c| !c.is_ascii() && c.is_alphabetic());
        let has_digit = chars.iter().any(|c| c.is_ascii_digit());
        if !(has_ascii_letter && has_extended_letter && has_digit) {
            return Err(LegibilityError::validation(
                "probe_chars must include an ASCII letter, a non-ASCII letter and a digit",
            ));
        }
        Ok(())
    }
}

/// Why a candidate was excluded from the validated pool.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// The renderer could not load or rasterize the source.
    #[error("could not be loaded: {0}")]
    LoadFailure(String),
    /// The probe raster is entirely background.
    #[error("nothing was drawn")]
    NothingDrawn,
    /// A probe cell is a single solid colour.
    #[error("uniform block drawn for '{ch}'")]
    UniformBlock {
        /// Offending probe character.
        ch: char,
    },
    /// A probe cell is almost entirely background.
    #[error("near-empty glyph for '{ch}' ({ink_fraction:.3} of pixels inked)")]
    NearEmpty {
        /// Offending probe character.
        ch: char,
        /// Fraction of the cell that differs from background.
        ink_fraction: f64,
    },
    /// Two distinct probe characters produced identical pixels.
    #[error("'{first}' and '{second}' render identically")]
    DuplicateCells {
        /// Earlier probe character.
        first: char,
        /// Later probe character.
        second: char,
    },
    /// Too few distinct channel values to be legible once blurred.
    #[error("only {distinct} distinct pixel values")]
    LowDiversity {
        /// Distinct values observed.
        distinct: usize,
    },
}

/// Outcome of validating one source.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    /// The source is usable.
    Accepted,
    /// The source is excluded for the rest of the run.
    Rejected(Rejection),
}

impl Verdict {
    /// True for [`Verdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Probe characters drawn side by side, one square cell each.
#[derive(Clone, Debug)]
pub struct Probe {
    raster: Raster,
    cells: Vec<(char, Raster)>,
}

impl Probe {
    /// Assemble a probe from per-character cells of equal size.
    pub fn from_cells(cells: Vec<(char, Raster)>, background: [u8; 4]) -> Self {
        let cell_w = cells.first().map(|(_, c)| c.width()).unwrap_or(0);
        let cell_h = cells.first().map(|(_, c)| c.height()).unwrap_or(0);
        let mut raster = Raster::filled(cell_w * cells.len() as u32, cell_h, background);
        for (i, (_, cell)) in cells.iter().enumerate() {
            raster.blit(cell, i64::from(cell_w) * i as i64, 0);
        }
        Self { raster, cells }
    }

    /// The full probe raster.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Per-character cells in probe order.
    pub fn cells(&self) -> &[(char, Raster)] {
        &self.cells
    }
}

/// Render-and-inspect heuristic deciding whether a font is usable.
#[derive(Clone, Debug)]
pub struct FontValidator {
    config: ValidatorConfig,
}

impl Default for FontValidator {
    fn default() -> Self {
        Self {
            config: ValidatorConfig::default(),
        }
    }
}

impl FontValidator {
    /// Construct a validator after checking `config`.
    pub fn new(config: ValidatorConfig) -> LegibilityResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// `true` when `source` is usable.
    pub fn validate<R: TextRenderer + ?Sized>(&self, renderer: &mut R, source: &RenderSource) -> bool {
        self.verdict(renderer, source).is_accepted()
    }

    /// Render the probe for `source` and judge it.
    pub fn verdict<R: TextRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        source: &RenderSource,
    ) -> Verdict {
        match self.probe(renderer, source) {
            Ok(probe) => self.inspect(&probe),
            Err(e) => Verdict::Rejected(Rejection::LoadFailure(e.to_string())),
        }
    }

    /// Draw each probe character into its own cell, cropped or padded to the probe size.
    pub fn probe<R: TextRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        source: &RenderSource,
    ) -> LegibilityResult<Probe> {
        let size = self.config.probe_size_px;
        let bg = self.config.background_rgba;
        let mut cells = Vec::new();
        for ch in self.config.probe_chars.chars() {
            let glyph = renderer.render(ch.encode_utf8(&mut [0u8; 4]), source, size)?;
            cells.push((ch, glyph.crop(0, 0, size, size, bg)));
        }
        Ok(Probe::from_cells(cells, bg))
    }

    /// Apply the rejection rules in order; the first match wins.
    pub fn inspect(&self, probe: &Probe) -> Verdict {
        let bg = self.config.background_rgba;

        if probe.raster().is_uniform(bg) {
            return Verdict::Rejected(Rejection::NothingDrawn);
        }

        for (ch, cell) in probe.cells() {
            if let Some(first) = cell.pixel(0, 0)
                && cell.is_uniform(first)
            {
                return Verdict::Rejected(Rejection::UniformBlock { ch: *ch });
            }
        }

        for (ch, cell) in probe.cells() {
            let area = (cell.width() as usize) * (cell.height() as usize);
            let inked = cell.pixels().filter(|px| *px != bg).count();
            let ink_fraction = if area == 0 {
                0.0
            } else {
                inked as f64 / area as f64
            };
            if ink_fraction < self.config.min_ink_fraction {
                return Verdict::Rejected(Rejection::NearEmpty {
                    ch: *ch,
                    ink_fraction,
                });
            }
        }

        if let Some((first, second)) = first_duplicate_pair(probe.cells()) {
            return Verdict::Rejected(Rejection::DuplicateCells { first, second });
        }

        let distinct = distinct_channel_values(probe.raster());
        if distinct < self.config.min_distinct_values {
            return Verdict::Rejected(Rejection::LowDiversity { distinct });
        }

        Verdict::Accepted
    }
}

fn first_duplicate_pair(cells: &[(char, Raster)]) -> Option<(char, char)> {
    let hashes: Vec<u64> = cells.iter().map(|(_, c)| xxh3_64(c.data())).collect();
    for j in 1..cells.len() {
        for i in 0..j {
            let (a, cell_a) = &cells[i];
            let (b, cell_b) = &cells[j];
            if a != b && hashes[i] == hashes[j] && cell_a == cell_b {
                return Some((*a, *b));
            }
        }
    }
    None
}

fn distinct_channel_values(raster: &Raster) -> usize {
    let mut seen = [false; 256];
    for px in raster.pixels() {
        for &v in &px[..3] {
            seen[usize::from(v)] = true;
        }
    }
    seen.iter().filter(|s| **s).count()
}

#[cfg(test)]
#[path = "../../tests/unit/validate/validator.rs"]
mod tests;
