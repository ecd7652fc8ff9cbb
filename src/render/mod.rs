//! Text rasterization and the clarity blur.
//!
//! Renderers produce straight RGBA8 rasters composited over an opaque background, so every pixel
//! the validator or presenter sees is fully opaque.

/// The `TextRenderer` seam.
pub mod backend;
/// Gaussian blur driven by the clarity value.
pub mod blur;
/// parley + vello_cpu implementation of `TextRenderer`.
pub mod cpu;
pub(crate) mod layout;
/// Owned RGBA8 pixel buffer.
pub mod raster;
