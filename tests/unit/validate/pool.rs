use super::*;
use crate::render::raster::{Raster, WHITE};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Draws a distinct grey pattern per character, or nothing for sources named "Blank".
struct Stamp;

impl TextRenderer for Stamp {
    fn render(
        &mut self,
        text: &str,
        source: &RenderSource,
        size_px: u32,
    ) -> LegibilityResult<Raster> {
        let mut r = Raster::filled(size_px, size_px, WHITE);
        if source.name() == "Blank" {
            return Ok(r);
        }
        let code = text.chars().next().map(|c| c as u32).unwrap_or(0);
        for y in 0..size_px {
            for x in 0..size_px {
                if (x + y + code) % 3 == 0 {
                    let g = (40 + (x * 7 + y * 3 + code) % 150) as u8;
                    r.blit(&Raster::filled(1, 1, [g, g, g, 255]), x.into(), y.into());
                }
            }
        }
        Ok(r)
    }
}

fn candidates(names: &[&str]) -> Vec<RenderSource> {
    names
        .iter()
        .map(|n| RenderSource::new(format!("fonts/{n}.ttf")))
        .collect()
}

#[test]
fn blank_source_is_dropped_from_pool() {
    let pool = SourcePool::build(
        candidates(&["Arial", "Blank", "Georgia"]),
        &FontValidator::default(),
        || Stamp,
    )
    .unwrap();

    assert_eq!(pool.len(), 2);
    let names: Vec<&str> = pool.sources().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Arial", "Georgia"]);
    assert_eq!(pool.rejected().len(), 1);
    assert_eq!(pool.rejected()[0].name(), "Blank");
    assert_eq!(pool.fallback().name(), "Arial");
}

#[test]
fn all_rejected_is_empty_pool_error() {
    let err = SourcePool::build(
        candidates(&["Blank", "Blank"]),
        &FontValidator::default(),
        || Stamp,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        LegibilityError::EmptyValidatedPool { candidates: 2 }
    ));
}

#[test]
fn no_candidates_is_empty_pool_error() {
    let err = SourcePool::build(Vec::new(), &FontValidator::default(), || Stamp).unwrap_err();
    assert!(matches!(
        err,
        LegibilityError::EmptyValidatedPool { candidates: 0 }
    ));
}

#[test]
fn from_validated_refuses_unjudged_sources() {
    assert!(SourcePool::from_validated(candidates(&["Arial"])).is_err());

    let ok = RenderSource::new("Arial.ttf").with_verdict(Verdict::Accepted);
    assert_eq!(SourcePool::from_validated(vec![ok]).unwrap().len(), 1);
}

#[test]
fn choose_only_returns_pool_members() {
    let pool = SourcePool::build(
        candidates(&["Arial", "Blank", "Georgia"]),
        &FontValidator::default(),
        || Stamp,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        assert!(pool.choose(&mut rng).is_valid());
    }
}
