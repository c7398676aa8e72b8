use image::{Rgb, Rgba};

use super::*;

fn solid_rgb(w: u32, h: u32, px: [u8; 3]) -> SourceImage {
    SourceImage::from_rgb(RgbImage::from_pixel(w, h, Rgb(px))).unwrap()
}

#[test]
fn no_source_yields_default_canvas() {
    let comp = Compositor::default();
    let out = comp.render(None, &CanvasParameters::default()).unwrap();
    assert_eq!(out.canvas.size(), CanvasSize::FULL_HD);
    assert!(out.placement.is_none());
    assert!(out.scale.is_none());
    assert!(out.canvas.pixels().pixels().all(|p| p.0 == [45, 45, 45]));
    assert_eq!(out.canvas.get_pixel(1919, 1079), Some([45, 45, 45]));
    assert_eq!(out.canvas.get_pixel(1920, 0), None);
    assert_eq!(out.canvas.get_pixel(0, 1080), None);
}

#[test]
fn new_rejects_invalid_config() {
    let cfg = CompositorConfig {
        min_scale: -1.0,
        ..CompositorConfig::default()
    };
    assert!(Compositor::new(cfg).is_err());
    assert!(Compositor::new(CompositorConfig::extended_scale()).is_ok());
}

#[test]
fn solid_background_fills_around_foreground() {
    let src = solid_rgb(100, 50, [255, 0, 0]);
    let params = CanvasParameters {
        background_color: Rgb8::new(0, 0, 255),
        offset_x: 10,
        offset_y: -20,
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&src), &params).unwrap();
    let p = out.placement.unwrap();
    assert_eq!((p.x, p.y), (10, 20));

    assert_eq!(out.canvas.pixel(10, 20), [255, 0, 0]);
    assert_eq!(out.canvas.pixel(109, 69), [255, 0, 0]);
    assert_eq!(out.canvas.pixel(110, 69), [0, 0, 255]);
    assert_eq!(out.canvas.pixel(9, 20), [0, 0, 255]);
    assert_eq!(out.canvas.pixel(1919, 1079), [0, 0, 255]);
}

#[test]
fn scale_is_clamped_to_bounds() {
    let src = solid_rgb(10, 10, [1, 2, 3]);
    let params = CanvasParameters {
        scale: 50.0,
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&src), &params).unwrap();
    assert_eq!(out.scale, Some(3.0));
    assert_eq!(out.placement.unwrap().size, CanvasSize::new(30, 30).unwrap());

    let out = Compositor::new(CompositorConfig::extended_scale())
        .unwrap()
        .render(Some(&src), &params)
        .unwrap();
    assert_eq!(out.scale, Some(10.0));

    let params = CanvasParameters {
        scale: f64::NAN,
        ..CanvasParameters::default()
    };
    assert!(Compositor::default().render(Some(&src), &params).is_err());
}

#[test]
fn far_off_canvas_placement_is_not_an_error() {
    let src = solid_rgb(40, 40, [9, 9, 9]);
    let params = CanvasParameters {
        offset_x: 960,
        offset_y: -540,
        scale: 0.1,
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&src), &params).unwrap();
    let p = out.placement.unwrap();
    assert_eq!((p.x, p.y), (960, 540));
    assert!(out.visible.is_some());

    let big = solid_rgb(1000, 1000, [9, 9, 9]);
    let params = CanvasParameters {
        offset_x: -960,
        offset_y: 540,
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&big), &params).unwrap();
    let visible = out.visible.unwrap();
    assert_eq!((visible.x, visible.y), (0, 0));
    assert_eq!((visible.width, visible.height), (40, 460));
}

#[test]
fn alpha_source_reveals_background() {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    img.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
    let src = SourceImage::from_rgba(img).unwrap();
    let params = CanvasParameters {
        background_color: Rgb8::gray(0),
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&src), &params).unwrap();
    assert_eq!(out.canvas.pixel(0, 0), [0, 0, 0]);
    assert_eq!(out.canvas.pixel(1, 1), [255, 255, 255]);
}

fn transparent_red_left_opaque_blue_right() -> SourceImage {
    let img = RgbaImage::from_fn(100, 100, |x, _| {
        if x < 50 {
            Rgba([255, 0, 0, 0])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    SourceImage::from_rgba(img).unwrap()
}

#[test]
fn downscaled_alpha_source_does_not_bleed_hidden_color() {
    let src = transparent_red_left_opaque_blue_right();
    let params = CanvasParameters {
        scale: 0.5,
        background_color: Rgb8::gray(0),
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&src), &params).unwrap();
    assert_eq!(out.placement.unwrap().size, CanvasSize::new(50, 50).unwrap());

    let max_red = out.canvas.pixels().pixels().map(|p| p.0[0]).max().unwrap();
    assert_eq!(max_red, 0);
    assert_eq!(out.canvas.pixel(10, 25), [0, 0, 0]);
    assert_eq!(out.canvas.pixel(40, 25), [0, 0, 255]);
}

#[test]
fn blur_backdrop_treats_transparent_regions_as_black() {
    let src = transparent_red_left_opaque_blue_right();
    let params = CanvasParameters {
        background: BackgroundMode::Blur,
        blur_radius: BlurRadius::R20,
        scale: 0.5,
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&src), &params).unwrap();
    assert!(out.canvas.pixels().pixels().all(|p| p.0[0] == 0));
    assert!(out.canvas.pixel(0, 540)[2] < out.canvas.pixel(1919, 540)[2]);
}

#[test]
fn inspect_reports_preshrink_and_cap() {
    let src = SourceImage::from_rgb(RgbImage::new(3840, 2160)).unwrap();
    let report = Compositor::new(CompositorConfig::extended_scale())
        .unwrap()
        .inspect(&src);
    assert_eq!(report.working_size, CanvasSize::FULL_HD);
    assert_eq!(report.scale_bounds.max, 3.0);
    assert_eq!(report.advisories.len(), 2);
    assert!(matches!(
        report.advisories[1],
        Advisory::PreShrunk { from, to } if from.width == 3840 && to == CanvasSize::FULL_HD
    ));
}

#[test]
fn blur_background_is_full_canvas_for_any_aspect() {
    let src = solid_rgb(30, 90, [200, 100, 50]);
    let params = CanvasParameters {
        background: BackgroundMode::Blur,
        blur_radius: BlurRadius::R20,
        offset_x: 1000,
        ..CanvasParameters::default()
    };
    let out = Compositor::default().render(Some(&src), &params).unwrap();
    assert_eq!(out.canvas.size(), CanvasSize::FULL_HD);
    // A uniform source stays uniform once stretched and blurred.
    assert_eq!(out.canvas.pixel(0, 1079), [200, 100, 50]);
    assert_eq!(out.canvas.pixel(1919, 0), [200, 100, 50]);
}
