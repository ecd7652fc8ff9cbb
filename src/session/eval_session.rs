use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::assets::corpus::{MIN_UNIT_TOKENS, TextUnit};
use crate::foundation::error::{LegibilityError, LegibilityResult};
use crate::render::backend::TextRenderer;
use crate::render::blur::blur;
use crate::render::raster::{Raster, WHITE};
use crate::session::clarity::ClarityConfig;
use crate::session::input::{InputEvent, LineTarget};
use crate::session::line::{FreezePolicy, Line, LineId, ResumePolicy};
use crate::session::recorder::SessionRecorder;
use crate::session::rotation::{ContentRotation, RotationMode};
use crate::session::scheduler::{DecayScheduler, SchedulerConfig, Ticker};
use crate::validate::pool::SourcePool;

/// Geometry of one displayed line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLayout {
    /// Font size of the sample text.
    pub font_size_px: u32,
    /// Width of a line's canvas.
    pub width_px: u32,
    /// Height of a line's canvas.
    pub height_px: u32,
    /// Canvas background.
    pub background_rgba: [u8; 4],
}

impl Default for LineLayout {
    fn default() -> Self {
        Self {
            font_size_px: 40,
            width_px: 800,
            height_px: 120,
            background_rgba: WHITE,
        }
    }
}

/// Everything that shapes an evaluation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of lines shown at once.
    pub lines: usize,
    /// Content rotation granularity.
    pub rotation: RotationMode,
    /// Behaviour of freeze signals.
    pub freeze_policy: FreezePolicy,
    /// Clarity of a line coming back from frozen.
    pub resume_policy: ResumePolicy,
    /// Clarity range and manual step.
    pub clarity: ClarityConfig,
    /// Tick and decay cadence.
    pub scheduler: SchedulerConfig,
    /// Line geometry.
    pub layout: LineLayout,
    /// Minimum tokens per text unit.
    pub min_unit_tokens: usize,
    /// Seed for content and source draws; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lines: 1,
            rotation: RotationMode::Word,
            freeze_policy: FreezePolicy::SingleShot,
            resume_policy: ResumePolicy::Continue,
            clarity: ClarityConfig::default(),
            scheduler: SchedulerConfig::default(),
            layout: LineLayout::default(),
            min_unit_tokens: MIN_UNIT_TOKENS,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Check every nested section.
    pub fn validate(&self) -> LegibilityResult<()> {
        if self.lines == 0 {
            return Err(LegibilityError::validation("a session needs at least one line"));
        }
        if self.layout.font_size_px == 0 || self.layout.width_px == 0 || self.layout.height_px == 0
        {
            return Err(LegibilityError::validation(
                "line layout sizes must be > 0",
            ));
        }
        self.clarity.validate()?;
        self.scheduler.validate()
    }
}

/// Snapshot of one line as presented.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineView {
    /// Line index.
    pub id: LineId,
    /// Display name of the line's source.
    pub source: String,
    /// Clarity at render time.
    pub clarity: f64,
    /// Whether the line is frozen.
    pub frozen: bool,
    /// Text shown.
    pub content: String,
}

/// All lines rendered and stacked top to bottom.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Composed raster.
    pub raster: Raster,
    /// Per-line state, in display order.
    pub lines: Vec<LineView>,
}

/// Effects of one input event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// Lines whose state changed.
    pub changed: Vec<LineId>,
    /// Records appended.
    pub recorded: Vec<u64>,
    /// Records retracted.
    pub retracted: Vec<u64>,
}

impl Applied {
    /// `true` when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// An evaluation session: the single owner of every piece of mutable state.
///
/// Ticks and input events must be delivered from one thread, in arrival order.
pub struct EvalSession<R: TextRenderer> {
    config: SessionConfig,
    pool: SourcePool,
    rotation: ContentRotation,
    lines: Vec<Line>,
    scheduler: DecayScheduler,
    ticker: Ticker,
    recorder: SessionRecorder,
    renderer: R,
    rng: StdRng,
}

impl<R: TextRenderer> EvalSession<R> {
    /// Start a session at `now`.
    ///
    /// Fails on invalid configuration or when no text unit survives the token filter. The
    /// pool is non-empty by construction.
    #[tracing::instrument(skip_all, fields(lines = config.lines, sources = pool.len()))]
    pub fn new(
        config: SessionConfig,
        pool: SourcePool,
        units: Vec<TextUnit>,
        renderer: R,
        now: Instant,
    ) -> LegibilityResult<Self> {
        config.validate()?;
        let (content_rng, source_rng) = seeded_rngs(config.seed);
        let rotation = ContentRotation::new(units, config.min_unit_tokens, content_rng)?;
        let mut out = Self {
            scheduler: DecayScheduler::new(&config.scheduler),
            ticker: Ticker::new(config.scheduler.tick_interval(), now),
            config,
            pool,
            rotation,
            lines: Vec::new(),
            recorder: SessionRecorder::new(),
            renderer,
            rng: source_rng,
        };
        out.start_lines(now)?;
        tracing::info!("evaluation session started");
        Ok(out)
    }

    fn start_lines(&mut self, now: Instant) -> LegibilityResult<()> {
        self.scheduler.clear();
        self.rotation.reset_cursor();
        let mut lines = Vec::with_capacity(self.config.lines);
        for i in 0..self.config.lines {
            let mut line = Line::new(
                LineId(i),
                self.pool.choose(&mut self.rng),
                self.config.clarity.parameter()?,
            );
            line.rotate(&mut self.rotation, self.config.rotation);
            self.scheduler.register(line.id(), now);
            lines.push(line);
        }
        self.lines = lines;
        Ok(())
    }

    /// Active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The validated pool.
    pub fn pool(&self) -> &SourcePool {
        &self.pool
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Judgments so far.
    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    /// Time until the next tick is due.
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.ticker.time_until(now)
    }

    /// Run a tick if one is due at `now`, returning the new frame.
    pub fn poll(&mut self, now: Instant) -> Option<Frame> {
        if !self.ticker.poll(now) {
            return None;
        }
        Some(self.tick(now))
    }

    /// Run one tick unconditionally: decay, rotate every active line, redraw.
    pub fn tick(&mut self, now: Instant) -> Frame {
        let outcome = self.scheduler.tick(now, &mut self.lines);
        for id in outcome.rerender {
            if let Some(line) = self.lines.get_mut(id.0) {
                line.rotate(&mut self.rotation, self.config.rotation);
            }
        }
        self.render_frame()
    }

    /// Apply one input event synchronously.
    ///
    /// `Freeze(All)` freezes every active line and never toggles. Targeting a single frozen
    /// line with `Freeze` follows the freeze policy. `Unfreeze` only acts under
    /// [`FreezePolicy::Toggle`].
    pub fn apply(&mut self, event: InputEvent, now: Instant) -> Applied {
        let mut applied = Applied::default();
        let step = self.config.clarity.manual_step;
        let (targets, single) = match event {
            InputEvent::Decrease(t)
            | InputEvent::Increase(t)
            | InputEvent::Freeze(t)
            | InputEvent::Unfreeze(t) => (self.resolve(t), matches!(t, LineTarget::Line(_))),
        };

        for id in targets {
            let changed = match event {
                InputEvent::Decrease(_) => self.lines[id.0].adjust(-step),
                InputEvent::Increase(_) => self.lines[id.0].adjust(step),
                InputEvent::Freeze(_) => self.freeze_line(id, single, now, &mut applied),
                InputEvent::Unfreeze(_) => self.unfreeze_line(id, now, &mut applied),
            };
            if changed {
                applied.changed.push(id);
            }
        }
        tracing::debug!(?event, changed = applied.changed.len(), "input applied");
        applied
    }

    fn resolve(&self, target: LineTarget) -> Vec<LineId> {
        match target {
            LineTarget::All => self.lines.iter().map(Line::id).collect(),
            LineTarget::Line(id) if id.0 < self.lines.len() => vec![id],
            LineTarget::Line(id) => {
                tracing::warn!(line = id.0 + 1, "input for a line that does not exist");
                Vec::new()
            }
        }
    }

    fn freeze_line(&mut self, id: LineId, single: bool, now: Instant, applied: &mut Applied) -> bool {
        let policy = self.config.freeze_policy;
        let line = &mut self.lines[id.0];
        if line.is_frozen() {
            return single
                && policy == FreezePolicy::Toggle
                && self.unfreeze_line(id, now, applied);
        }

        let Some(seq) = line.freeze(&mut self.recorder) else {
            return false;
        };
        applied.recorded.push(seq);
        match policy {
            FreezePolicy::SingleShot | FreezePolicy::Toggle => self.scheduler.unregister(id),
            FreezePolicy::Reassign => {
                let source = self.pool.choose(&mut self.rng);
                let line = &mut self.lines[id.0];
                line.reassign(source, self.config.clarity.start_value());
                line.rotate(&mut self.rotation, self.config.rotation);
                self.scheduler.register(id, now);
            }
        }
        true
    }

    fn unfreeze_line(&mut self, id: LineId, now: Instant, applied: &mut Applied) -> bool {
        if self.config.freeze_policy != FreezePolicy::Toggle {
            return false;
        }
        let start = self.config.clarity.start_value();
        let Some(seq) =
            self.lines[id.0].unfreeze(&mut self.recorder, self.config.resume_policy, start)
        else {
            return false;
        };
        applied.retracted.push(seq);
        self.scheduler.register(id, now);
        true
    }

    /// Clear every record and restart all lines with fresh sources at `now`.
    pub fn reset(&mut self, now: Instant) -> LegibilityResult<()> {
        self.recorder.reset();
        self.start_lines(now)?;
        self.ticker = Ticker::new(self.config.scheduler.tick_interval(), now);
        tracing::info!("session reset");
        Ok(())
    }

    /// Render every line at its current clarity without advancing anything.
    pub fn render_frame(&mut self) -> Frame {
        let layout = &self.config.layout;
        let mut raster = Raster::filled(
            layout.width_px,
            layout.height_px * self.lines.len() as u32,
            layout.background_rgba,
        );
        let mut views = Vec::with_capacity(self.lines.len());
        for (i, line) in self.lines.iter().enumerate() {
            let sample = render_line(&mut self.renderer, &self.pool, layout, line);
            raster.blit(&sample, 0, i64::from(layout.height_px) * i as i64);
            views.push(LineView {
                id: line.id(),
                source: line.source().name().to_string(),
                clarity: line.clarity().value(),
                frozen: line.is_frozen(),
                content: line.content().to_string(),
            });
        }
        Frame {
            raster,
            lines: views,
        }
    }
}

/// Draw `line` centred on its canvas and blur by its clarity.
///
/// A failing source is retried once with the pool fallback; if that fails too the canvas is
/// left blank.
fn render_line<R: TextRenderer>(
    renderer: &mut R,
    pool: &SourcePool,
    layout: &LineLayout,
    line: &Line,
) -> Raster {
    let mut canvas = Raster::filled(layout.width_px, layout.height_px, layout.background_rgba);
    let text = line.content();
    let glyphs = match renderer.render(text, line.source(), layout.font_size_px) {
        Ok(r) => Some(r),
        Err(e) => {
            tracing::warn!(source = line.source().name(), error = %e, "render failed, using fallback");
            let fallback = pool.fallback();
            if fallback.path() == line.source().path() {
                None
            } else {
                renderer
                    .render(text, fallback, layout.font_size_px)
                    .inspect_err(|e| tracing::warn!(error = %e, "fallback render failed"))
                    .ok()
            }
        }
    };
    if let Some(glyphs) = glyphs {
        canvas.blit_centered(&glyphs);
    }

    match blur(&canvas, line.clarity().value()) {
        Ok(blurred) => blurred,
        Err(e) => {
            tracing::warn!(error = %e, "blur failed, showing sharp sample");
            canvas
        }
    }
}

fn seeded_rngs(seed: Option<u64>) -> (StdRng, StdRng) {
    match seed {
        Some(s) => (
            StdRng::seed_from_u64(s),
            StdRng::seed_from_u64(s ^ 0x9E37_79B9_7F4A_7C15),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/eval_session.rs"]
mod tests;
