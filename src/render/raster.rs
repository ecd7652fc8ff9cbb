use crate::foundation::error::{LegibilityError, LegibilityResult};

/// Opaque white, the background every sample is drawn on.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// An RGBA8 bitmap, tightly packed and row-major.
///
/// Renderers composite glyphs over an opaque background, so pixels are effectively straight
/// and premultiplied at the same time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Build a raster of `width x height` filled with `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba.repeat((width as usize) * (height as usize));
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap existing RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> LegibilityResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LegibilityError::render("raster size overflow"))?;
        if data.len() != expected {
            return Err(LegibilityError::render(format!(
                "raster byte len {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume into raw RGBA8 bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(4)
    }

    /// Copy `src` onto `self` with its top-left corner at `(x, y)`, clipping at the edges.
    pub fn blit(&mut self, src: &Raster, x: i64, y: i64) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        for sy in 0..i64::from(src.height) {
            let dy = y + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }
            let sx0 = (-x).max(0);
            let sx1 = i64::from(src.width).min(dst_w - x);
            if sx0 >= sx1 {
                continue;
            }
            let s_row = (sy * i64::from(src.width)) as usize;
            let d_row = (dy * dst_w) as usize;
            let s = (s_row + sx0 as usize) * 4;
            let d = (d_row + (x + sx0) as usize) * 4;
            let n = ((sx1 - sx0) as usize) * 4;
            self.data[d..d + n].copy_from_slice(&src.data[s..s + n]);
        }
    }

    /// Copy `src` centred onto `self`.
    pub fn blit_centered(&mut self, src: &Raster) {
        let x = (i64::from(self.width) - i64::from(src.width)) / 2;
        let y = (i64::from(self.height) - i64::from(src.height)) / 2;
        self.blit(src, x, y);
    }

    /// Sub-rectangle copy. Areas outside `self` are filled with `fill`.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32, fill: [u8; 4]) -> Raster {
        let mut out = Raster::filled(width, height, fill);
        out.blit(self, -i64::from(x), -i64::from(y));
        out
    }

    /// True when every pixel equals `rgba`.
    pub fn is_uniform(&self, rgba: [u8; 4]) -> bool {
        self.pixels().all(|px| px == rgba)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
