use super::*;

#[test]
fn compositing_over_white_keeps_transparent_pixels_white() {
    let mut px = vec![0u8, 0, 0, 0, 0, 0, 0, 255, 64, 64, 64, 128];
    premul_over_opaque_in_place(&mut px, WHITE);
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 255]);
    // Half-covered mid grey lands between ink and paper.
    assert!(px[8] > 64 && px[8] < 255);
    assert_eq!(px[11], 255);
}

#[test]
fn missing_font_file_is_a_source_load_failure() {
    let mut r = CpuTextRenderer::default();
    let source = RenderSource::new("target/does-not-exist/Nope.ttf");
    let err = r.render("abc", &source, 30).unwrap_err();
    assert!(matches!(err, LegibilityError::SourceLoad { .. }));
}

#[test]
fn garbage_font_bytes_are_a_source_load_failure() {
    let dir = PathBuf::from("target").join("cpu_renderer_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("Garbage.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();

    let mut r = CpuTextRenderer::default();
    let err = r.render("abc", &RenderSource::new(&path), 30).unwrap_err();
    assert!(matches!(err, LegibilityError::SourceLoad { .. }));
}

/// First installed system face from a short list of common ones.
fn system_font() -> Option<RenderSource> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
    .map(RenderSource::new)
}

#[test]
fn real_font_draws_ink_inside_the_line_box() {
    let Some(source) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let mut r = CpuTextRenderer::default();
    let raster = r.render("Hello world", &source, 40).unwrap();
    assert!(raster.height() >= 20);

    // Cap-height ink sits between the top and the baseline, well away from row 0.
    let middle = raster.crop(0, raster.height() / 4, raster.width(), raster.height() / 2, WHITE);
    let inked = middle.pixels().filter(|px| px[0] < 128).count();
    assert!(inked > 20, "only {inked} dark pixels in the middle band");
}

#[test]
fn real_font_passes_validation() {
    use crate::validate::validator::{FontValidator, Verdict};

    let Some(source) = system_font() else {
        eprintln!("skipping: no system font found");
        return;
    };
    let mut r = CpuTextRenderer::default();
    assert_eq!(FontValidator::default().verdict(&mut r, &source), Verdict::Accepted);
}
