use super::*;

#[test]
fn blur_sigma_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    let out = gaussian_blur_rgb8(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (9u32, 5u32);
    let px = [10u8, 20u8, 30u8];
    let src = px.repeat((w * h) as usize);
    let out = gaussian_blur_rgb8(&src, w, h, 20.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_single_pixel_symmetrically() {
    let (w, h) = (21u32, 21u32);
    let mut src = vec![0u8; (w * h * 3) as usize];
    let idx = |x: u32, y: u32| ((y * w + x) * 3) as usize;
    let c = idx(10, 10);
    src[c..c + 3].copy_from_slice(&[255, 255, 255]);

    let out = gaussian_blur_rgb8(&src, w, h, 1.5).unwrap();

    let nonzero = out.chunks_exact(3).filter(|px| px[0] != 0).count();
    assert!(nonzero > 1);
    assert!(out[c] < 255);
    assert_eq!(out[idx(9, 10)], out[idx(11, 10)]);
    assert_eq!(out[idx(10, 9)], out[idx(10, 11)]);
    assert!(out[idx(10, 10)] >= out[idx(11, 10)]);
}

#[test]
fn blur_rejects_mismatched_buffers_and_bad_sigma() {
    assert!(gaussian_blur_rgb8(&[0u8; 5], 1, 2, 1.0).is_err());
    assert!(gaussian_blur_rgb8(&[0u8; 6], 1, 2, -1.0).is_err());
    assert!(gaussian_blur_rgb8(&[0u8; 6], 1, 2, f32::NAN).is_err());
}

#[test]
fn box_radii_grow_with_sigma() {
    let small = box_radii_for_gauss(2.0);
    let large = box_radii_for_gauss(100.0);
    assert!(small.iter().sum::<u32>() < large.iter().sum::<u32>());

    // Variance of a width-w box is (w^2 - 1) / 12; three of them should approximate sigma^2.
    let var: f64 = large
        .iter()
        .map(|&r| {
            let w = f64::from(2 * r + 1);
            (w * w - 1.0) / 12.0
        })
        .sum();
    assert!((var.sqrt() - 100.0).abs() < 2.0);
}
