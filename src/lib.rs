//! Legibility is a progressive-legibility evaluation engine.
//!
//! It shows an evaluator text samples that start heavily blurred and sharpen over time, and
//! records, per font, the clarity at which the evaluator judged the sample legible.
//!
//! # Pipeline overview
//!
//! 1. **Discover**: scan font directories into [`RenderSource`] candidates.
//! 2. **Validate**: render a probe per candidate and keep the usable ones in a [`SourcePool`].
//! 3. **Evaluate**: an [`EvalSession`] rotates content, decays clarity on every tick and applies
//!    evaluator [`InputEvent`]s.
//! 4. **Record**: frozen lines land in the [`SessionRecorder`], exported as a ranked list.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No globals**: all mutable state lives in one [`EvalSession`], driven from one thread.
//! - **Pure pixels**: rendering and blurring return new rasters; presenters only write them out.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
pub(crate) mod validate;

/// Presentation adapters.
pub mod present;
/// Text rasterization and blur.
pub mod render;
/// Session state and the context object.
pub mod session;

pub use crate::assets::corpus::{
    BUILTIN_CORPUS, MIN_UNIT_TOKENS, TextUnit, load_corpus, split_units, units_from_text,
};
pub use crate::assets::fonts::{
    FONT_EXTENSIONS, RenderSource, SourceRef, Validity, list_candidate_sources,
};
pub use crate::config::{EngineConfig, default_font_dirs};
pub use crate::foundation::error::{LegibilityError, LegibilityResult};
pub use crate::present::png::PngPresenter;
pub use crate::present::presenter::{NullPresenter, Presenter};
pub use crate::render::backend::TextRenderer;
pub use crate::render::blur::blur;
pub use crate::render::cpu::{CpuRendererOpts, CpuTextRenderer};
pub use crate::render::raster::{Raster, WHITE};
pub use crate::session::clarity::{ClarityConfig, ClarityParameter};
pub use crate::session::eval_session::{
    Applied, EvalSession, Frame, LineLayout, LineView, SessionConfig,
};
pub use crate::session::input::{Command, InputEvent, LineTarget};
pub use crate::session::line::{FreezePolicy, Line, LineId, LineState, ResumePolicy};
pub use crate::session::recorder::{JudgmentRecord, SessionRecorder, export_lines};
pub use crate::session::rotation::{ContentRotation, RotationMode, WordCursor};
pub use crate::session::scheduler::{DecayScheduler, SchedulerConfig, TickOutcome, Ticker};
pub use crate::validate::pool::SourcePool;
pub use crate::validate::validator::{
    FontValidator, Probe, Rejection, ValidatorConfig, Verdict,
};
