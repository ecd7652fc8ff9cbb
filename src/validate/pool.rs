use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;

use crate::assets::fonts::RenderSource;
use crate::foundation::error::{LegibilityError, LegibilityResult};
use crate::render::backend::TextRenderer;
use crate::validate::validator::{FontValidator, Verdict};

/// The sources that passed validation, in discovery order. Never empty.
#[derive(Clone, Debug)]
pub struct SourcePool {
    sources: Vec<Arc<RenderSource>>,
    rejected: Vec<RenderSource>,
}

impl SourcePool {
    /// Validate every candidate and keep the accepted ones.
    ///
    /// Candidates are inspected in parallel; each rayon worker gets its own renderer from
    /// `make_renderer`. Rejections are logged and kept for reporting. Fails with
    /// [`LegibilityError::EmptyValidatedPool`] when nothing is accepted.
    #[tracing::instrument(skip_all, fields(candidates = candidates.len()))]
    pub fn build<R, F>(
        candidates: Vec<RenderSource>,
        validator: &FontValidator,
        make_renderer: F,
    ) -> LegibilityResult<Self>
    where
        R: TextRenderer,
        F: Fn() -> R + Sync + Send,
    {
        let total = candidates.len();
        let judged: Vec<RenderSource> = candidates
            .into_par_iter()
            .map_init(&make_renderer, |renderer, source| {
                let verdict = validator.verdict(renderer, &source);
                if let Verdict::Rejected(reason) = &verdict {
                    tracing::warn!(source = %source.path().display(), %reason, "font rejected");
                }
                source.with_verdict(verdict)
            })
            .collect();

        let (valid, rejected): (Vec<_>, Vec<_>) =
            judged.into_iter().partition(RenderSource::is_valid);
        tracing::info!(
            working = valid.len(),
            rejected = rejected.len(),
            "validated font pool"
        );
        Self::from_parts(valid, rejected, total)
    }

    /// Pool from sources that were already accepted.
    pub fn from_validated(sources: Vec<RenderSource>) -> LegibilityResult<Self> {
        let total = sources.len();
        if let Some(bad) = sources.iter().find(|s| !s.is_valid()) {
            return Err(LegibilityError::validation(format!(
                "source '{}' has not passed validation",
                bad.name()
            )));
        }
        Self::from_parts(sources, Vec::new(), total)
    }

    fn from_parts(
        valid: Vec<RenderSource>,
        rejected: Vec<RenderSource>,
        candidates: usize,
    ) -> LegibilityResult<Self> {
        if valid.is_empty() {
            return Err(LegibilityError::EmptyValidatedPool { candidates });
        }
        Ok(Self {
            sources: valid.into_iter().map(Arc::new).collect(),
            rejected,
        })
    }

    /// Number of usable sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Usable sources in discovery order.
    pub fn sources(&self) -> &[Arc<RenderSource>] {
        &self.sources
    }

    /// Candidates excluded for this run, with their reasons.
    pub fn rejected(&self) -> &[RenderSource] {
        &self.rejected
    }

    /// First usable source; used as the rendering fallback.
    pub fn fallback(&self) -> &Arc<RenderSource> {
        &self.sources[0]
    }

    /// Uniformly random usable source.
    pub fn choose<G: Rng + ?Sized>(&self, rng: &mut G) -> Arc<RenderSource> {
        let i = rng.gen_range(0..self.sources.len());
        Arc::clone(&self.sources[i])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/pool.rs"]
mod tests;
