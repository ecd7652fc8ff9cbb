use crate::assets::fonts::RenderSource;
use crate::foundation::error::LegibilityResult;
use crate::render::raster::Raster;

/// A rasterizer that draws text in a given render source.
///
/// Implementations return a raster sized to the drawn text, composited over an opaque
/// background. They never blur and never touch display surfaces; callers place and blur the
/// result themselves.
pub trait TextRenderer {
    /// Draw `text` at `size_px` using `source`.
    ///
    /// Errors mean the source could not be loaded or rasterized at all.
    fn render(&mut self, text: &str, source: &RenderSource, size_px: u32)
    -> LegibilityResult<Raster>;
}

impl<R: TextRenderer + ?Sized> TextRenderer for Box<R> {
    fn render(
        &mut self,
        text: &str,
        source: &RenderSource,
        size_px: u32,
    ) -> LegibilityResult<Raster> {
        (**self).render(text, source, size_px)
    }
}
