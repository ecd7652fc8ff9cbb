use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::LegibilityResult;
use crate::present::presenter::Presenter;
use crate::session::eval_session::Frame;

/// Rewrites one PNG file with every frame it is given.
#[derive(Clone, Debug)]
pub struct PngPresenter {
    out: PathBuf,
}

impl PngPresenter {
    /// Presenter writing to `out`. Parent directories are created on first write.
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self { out: out.into() }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.out
    }
}

impl Presenter for PngPresenter {
    fn present(&mut self, frame: &Frame) -> LegibilityResult<()> {
        if let Some(parent) = self.out.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            &self.out,
            frame.raster.data(),
            frame.raster.width(),
            frame.raster.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", self.out.display()))?;

        for line in &frame.lines {
            tracing::debug!(
                line = line.id.0 + 1,
                source = %line.source,
                clarity = line.clarity,
                frozen = line.frozen,
                content = %line.content,
                "presented"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/png.rs"]
mod tests;
