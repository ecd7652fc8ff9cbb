use crate::foundation::error::{LegibilityError, LegibilityResult};
use crate::render::raster::Raster;

/// Kernel extent in standard deviations.
const KERNEL_SIGMAS: f64 = 3.0;
const MAX_REACH: i64 = 64;
/// 1.0 in Q16.
const ONE: u64 = 1 << 16;

/// Gaussian blur where `clarity` is the standard deviation in pixels.
///
/// `clarity <= 0` returns an identical copy. Edges clamp, so a uniform raster stays uniform.
pub fn blur(src: &Raster, clarity: f64) -> LegibilityResult<Raster> {
    if !clarity.is_finite() {
        return Err(LegibilityError::validation("blur radius must be finite"));
    }
    if clarity <= 0.0 || src.width() == 0 || src.height() == 0 {
        return Ok(src.clone());
    }
    let kernel = Kernel::for_clarity(clarity);
    let rows = kernel.convolve(src, Axis::Rows)?;
    kernel.convolve(&rows, Axis::Columns)
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}

/// Symmetric Q16 taps covering `-reach..=reach`, summing to exactly [`ONE`].
struct Kernel {
    taps: Vec<u64>,
    reach: i64,
}

impl Kernel {
    fn for_clarity(sigma: f64) -> Self {
        let reach = ((sigma * KERNEL_SIGMAS).ceil() as i64).clamp(1, MAX_REACH);
        let denom = 2.0 * sigma * sigma;
        let weights: Vec<f64> = (-reach..=reach)
            .map(|i| (-((i * i) as f64) / denom).exp())
            .collect();
        // The centre weight is 1, so the sum is never zero.
        let sum: f64 = weights.iter().sum();
        let mut taps: Vec<u64> = weights
            .iter()
            .map(|w| (w / sum * ONE as f64).round() as u64)
            .collect();

        // Rounding residue goes to the centre tap.
        let total: u64 = taps.iter().sum();
        let mid = reach as usize;
        taps[mid] = (taps[mid] + ONE).saturating_sub(total);
        Self { taps, reach }
    }

    fn convolve(&self, src: &Raster, axis: Axis) -> LegibilityResult<Raster> {
        let (w, h) = (i64::from(src.width()), i64::from(src.height()));
        let data = src.data();
        let mut out = Vec::with_capacity(data.len());
        for y in 0..h {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (offset, &tap) in (-self.reach..=self.reach).zip(&self.taps) {
                    let (sx, sy) = match axis {
                        Axis::Rows => ((x + offset).clamp(0, w - 1), y),
                        Axis::Columns => (x, (y + offset).clamp(0, h - 1)),
                    };
                    let at = ((sy * w + sx) * 4) as usize;
                    for (a, &v) in acc.iter_mut().zip(&data[at..at + 4]) {
                        *a += tap * u64::from(v);
                    }
                }
                out.extend(acc.map(|a| ((a + ONE / 2) >> 16).min(255) as u8));
            }
        }
        Raster::from_rgba8(src.width(), src.height(), out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
