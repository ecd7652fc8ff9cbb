use super::*;
use crate::render::raster::WHITE;

#[test]
fn blur_radius_0_is_identity() {
    let src = Raster::from_rgba8(1, 2, vec![1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let out = blur(&src, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_rejects_non_finite_radius() {
    let src = Raster::filled(2, 2, WHITE);
    assert!(blur(&src, f64::NAN).is_err());
}

#[test]
fn blur_constant_image_is_identity() {
    let src = Raster::filled(4, 3, [10, 20, 30, 255]);
    let out = blur(&src, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_ink_from_single_pixel() {
    let mut src = Raster::filled(9, 9, WHITE);
    src.blit(&Raster::filled(1, 1, [0, 0, 0, 255]), 4, 4);

    let out = blur(&src, 1.2).unwrap();

    let inked = out.pixels().filter(|px| px[0] < 255).count();
    assert!(inked > 1);
    let centre = out.pixel(4, 4).unwrap();
    assert!(centre[0] > 0, "centre ink should be diluted");

    // Total darkness is conserved up to Q16 rounding.
    let ink: u32 = out.pixels().map(|px| 255 - u32::from(px[0])).sum();
    assert!((ink as i32 - 255).abs() <= 6);
}

#[test]
fn wider_blur_lowers_peak_contrast() {
    let mut src = Raster::filled(21, 21, WHITE);
    src.blit(&Raster::filled(3, 3, [0, 0, 0, 255]), 9, 9);

    let narrow = blur(&src, 1.0).unwrap().pixel(10, 10).unwrap()[0];
    let wide = blur(&src, 4.0).unwrap().pixel(10, 10).unwrap()[0];
    assert!(wide > narrow);
}

#[test]
fn kernel_taps_are_symmetric_and_sum_to_one() {
    for sigma in [0.1, 1.0, 2.5, 6.0, 40.0] {
        let k = Kernel::for_clarity(sigma);
        assert_eq!(k.taps.len() as i64, 2 * k.reach + 1);
        assert_eq!(k.taps.iter().sum::<u64>(), ONE);
        let mirrored: Vec<u64> = k.taps.iter().rev().copied().collect();
        assert_eq!(k.taps, mirrored);
    }
    assert_eq!(Kernel::for_clarity(0.1).reach, 1);
    assert_eq!(Kernel::for_clarity(40.0).reach, MAX_REACH);
}

#[test]
fn blur_keeps_empty_raster() {
    let src = Raster::filled(0, 5, WHITE);
    assert_eq!(blur(&src, 3.0).unwrap(), src);
}
