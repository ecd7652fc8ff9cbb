use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::fonts::RenderSource;
use crate::foundation::error::{LegibilityError, LegibilityResult};
use crate::render::backend::TextRenderer;
use crate::render::layout::{TextBrushRgba8, TextLayoutEngine};
use crate::render::raster::{Raster, WHITE};

/// Options for the CPU text renderer.
#[derive(Clone, Copy, Debug)]
pub struct CpuRendererOpts {
    /// Glyph colour, straight RGBA8.
    pub ink_rgba: [u8; 4],
    /// Opaque background colour.
    pub background_rgba: [u8; 4],
}

impl Default for CpuRendererOpts {
    fn default() -> Self {
        Self {
            ink_rgba: [0, 0, 0, 255],
            background_rgba: WHITE,
        }
    }
}

struct LoadedFace {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl LoadedFace {
    fn load(path: &Path) -> LegibilityResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))
            .map_err(|e| LegibilityError::source_load(path, format!("{e:#}")))?;
        let engine = TextLayoutEngine::for_font(&bytes)
            .map_err(|e| LegibilityError::source_load(path, e.to_string()))?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(Self { engine, font })
    }
}

/// [`TextRenderer`] backed by Parley layout and `vello_cpu` glyph rasterization.
///
/// Loaded fonts are cached per source path for the lifetime of the renderer.
pub struct CpuTextRenderer {
    opts: CpuRendererOpts,
    faces: HashMap<PathBuf, LoadedFace>,
}

impl Default for CpuTextRenderer {
    fn default() -> Self {
        Self::new(CpuRendererOpts::default())
    }
}

impl CpuTextRenderer {
    /// Construct a renderer with an empty font cache.
    pub fn new(opts: CpuRendererOpts) -> Self {
        Self {
            opts,
            faces: HashMap::new(),
        }
    }

    /// Family name of a source, loading it if needed.
    pub fn family_name(&mut self, source: &RenderSource) -> LegibilityResult<String> {
        Ok(self.face_for(source.path())?.engine.family_name().to_string())
    }

    fn face_for(&mut self, path: &Path) -> LegibilityResult<&mut LoadedFace> {
        if !self.faces.contains_key(path) {
            let face = LoadedFace::load(path)?;
            self.faces.insert(path.to_path_buf(), face);
        }
        self.faces
            .get_mut(path)
            .ok_or_else(|| LegibilityError::source_load(path, "font cache miss"))
    }
}

impl TextRenderer for CpuTextRenderer {
    fn render(
        &mut self,
        text: &str,
        source: &RenderSource,
        size_px: u32,
    ) -> LegibilityResult<Raster> {
        let bg = self.opts.background_rgba;
        let brush = TextBrushRgba8::from(self.opts.ink_rgba);
        let face = self.face_for(source.path())?;
        if text.trim().is_empty() {
            return Ok(Raster::filled(1, size_px.max(1), bg));
        }

        let layout = face.engine.layout_plain(text, size_px as f32, brush)?;
        let width = (layout.width().ceil() as u32).max(1);
        let height = (layout.height().ceil() as u32).max(1);
        let w: u16 = width
            .try_into()
            .map_err(|_| LegibilityError::render("text raster width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| LegibilityError::render("text raster height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positioned glyphs carry the run baseline; plain `glyphs()` sit at y = 0.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&face.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let mut out = pixmap.data_as_u8_slice().to_vec();
        premul_over_opaque_in_place(&mut out, bg);
        Raster::from_rgba8(width, height, out)
    }
}

fn premul_over_opaque_in_place(px: &mut [u8], bg: [u8; 4]) {
    for p in px.chunks_exact_mut(4) {
        let inv = 255 - u16::from(p[3]);
        for c in 0..3 {
            let under = (u16::from(bg[c]) * inv + 127) / 255;
            p[c] = (u16::from(p[c]) + under).min(255) as u8;
        }
        p[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
