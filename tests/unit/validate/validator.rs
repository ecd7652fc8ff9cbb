use super::*;

#[derive(Clone, Copy)]
enum Mode {
    Glyphs,
    Blank,
    Boxes,
    SameGlyph,
    Speck,
    TwoTone,
    Fails,
}

struct PatternRenderer(Mode);

fn paint_cell(r: &mut Raster, x0: u32, size: u32, ch: char, mode: Mode) {
    let code = ch as u32;
    for y in 0..size {
        for x in 0..size {
            let px = match mode {
                Mode::Glyphs if (x + y + code) % 3 == 0 => {
                    let g = (40 + (x * 7 + y * 3 + code) % 150) as u8;
                    Some([g, g, g, 255])
                }
                Mode::SameGlyph if (x + y) % 3 == 0 => {
                    let g = (40 + (x * 7 + y * 3) % 150) as u8;
                    Some([g, g, g, 255])
                }
                Mode::TwoTone if (x + 2 * y + code) % 7 == 0 => Some([0, 0, 0, 255]),
                Mode::Boxes => Some([0, 0, 0, 255]),
                Mode::Speck if x == size / 2 && y == size / 2 => Some([0, 0, 0, 255]),
                _ => None,
            };
            if let Some(px) = px {
                r.blit(&Raster::filled(1, 1, px), i64::from(x0 + x), i64::from(y));
            }
        }
    }
}

impl TextRenderer for PatternRenderer {
    fn render(
        &mut self,
        text: &str,
        source: &RenderSource,
        size_px: u32,
    ) -> LegibilityResult<Raster> {
        if let Mode::Fails = self.0 {
            return Err(LegibilityError::source_load(source.path(), "unreadable"));
        }
        let n = text.chars().count().max(1) as u32;
        let mut r = Raster::filled(size_px * n, size_px, WHITE);
        if let Mode::Blank = self.0 {
            return Ok(r);
        }
        for (i, ch) in text.chars().enumerate() {
            paint_cell(&mut r, size_px * i as u32, size_px, ch, self.0);
        }
        Ok(r)
    }
}

fn verdict_for(mode: Mode) -> Verdict {
    let v = FontValidator::default();
    v.verdict(&mut PatternRenderer(mode), &RenderSource::new("Synthetic.ttf"))
}

#[test]
fn healthy_glyphs_are_accepted() {
    assert_eq!(verdict_for(Mode::Glyphs), Verdict::Accepted);
}

#[test]
fn blank_raster_is_nothing_drawn() {
    assert_eq!(
        verdict_for(Mode::Blank),
        Verdict::Rejected(Rejection::NothingDrawn)
    );
}

#[test]
fn solid_boxes_are_uniform_blocks() {
    assert_eq!(
        verdict_for(Mode::Boxes),
        Verdict::Rejected(Rejection::UniformBlock { ch: 'A' })
    );
}

#[test]
fn single_speck_is_near_empty() {
    let Verdict::Rejected(Rejection::NearEmpty { ch, ink_fraction }) = verdict_for(Mode::Speck)
    else {
        panic!("expected near-empty rejection");
    };
    assert_eq!(ch, 'A');
    assert!(ink_fraction > 0.0 && ink_fraction < 0.01);
}

#[test]
fn identical_cells_are_duplicates() {
    assert_eq!(
        verdict_for(Mode::SameGlyph),
        Verdict::Rejected(Rejection::DuplicateCells {
            first: 'A',
            second: 'Ö'
        })
    );
}

#[test]
fn black_and_white_glyphs_lack_tonal_diversity() {
    assert_eq!(
        verdict_for(Mode::TwoTone),
        Verdict::Rejected(Rejection::LowDiversity { distinct: 2 })
    );
}

#[test]
fn load_failure_is_a_rejection_not_an_error() {
    let v = verdict_for(Mode::Fails);
    assert!(matches!(v, Verdict::Rejected(Rejection::LoadFailure(_))));
}

#[test]
fn verdicts_are_deterministic() {
    let v = FontValidator::default();
    let source = RenderSource::new("Synthetic.ttf");
    for mode in [Mode::Glyphs, Mode::SameGlyph, Mode::Speck] {
        let mut r = PatternRenderer(mode);
        let a = v.verdict(&mut r, &source);
        let b = v.verdict(&mut r, &source);
        assert_eq!(a, b);
        assert_eq!(v.validate(&mut r, &source), a.is_accepted());
    }
}

#[test]
fn thresholds_are_tunable() {
    let lenient = FontValidator::new(ValidatorConfig {
        min_distinct_values: 2,
        ..ValidatorConfig::default()
    })
    .unwrap();
    let mut r = PatternRenderer(Mode::TwoTone);
    assert!(lenient.validate(&mut r, &RenderSource::new("Synthetic.ttf")));
}

#[test]
fn probe_cells_are_cropped_to_probe_size() {
    let v = FontValidator::default();
    let probe = v
        .probe(&mut PatternRenderer(Mode::Glyphs), &RenderSource::new("x.ttf"))
        .unwrap();
    assert_eq!(probe.cells().len(), 3);
    assert!(
        probe
            .cells()
            .iter()
            .all(|(_, c)| c.width() == 30 && c.height() == 30)
    );
    assert_eq!(probe.raster().width(), 90);
}

#[test]
fn probe_chars_must_cover_letter_classes() {
    let bad = ValidatorConfig {
        probe_chars: "AB1".to_string(),
        ..ValidatorConfig::default()
    };
    assert!(FontValidator::new(bad).is_err());

    let zero = ValidatorConfig {
        probe_size_px: 0,
        ..ValidatorConfig::default()
    };
    assert!(FontValidator::new(zero).is_err());
}

#[test]
fn unreachable_diversity_threshold_is_rejected() {
    let cfg = ValidatorConfig {
        min_distinct_values: 257,
        ..ValidatorConfig::default()
    };
    assert!(matches!(
        FontValidator::new(cfg),
        Err(LegibilityError::Validation(_))
    ));

    let cfg = ValidatorConfig {
        min_distinct_values: 256,
        ..ValidatorConfig::default()
    };
    assert!(FontValidator::new(cfg).is_ok());
}
