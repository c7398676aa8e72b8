use super::*;

fn size(w: u32, h: u32) -> CanvasSize {
    CanvasSize::new(w, h).unwrap()
}

#[test]
fn scaled_dims_round_each_axis() {
    let cases = [
        ((1000u32, 500u32), 1.0f64),
        ((333, 777), 0.1),
        ((1920, 1080), 2.5),
        ((7, 3), 1.5),
        ((1, 1), 3.0),
        ((641, 359), 0.73),
    ];
    for ((w, h), scale) in cases {
        let out = scaled_dims(size(w, h), scale).unwrap();
        assert_eq!(i64::from(out.width), (f64::from(w) * scale).round() as i64);
        assert_eq!(i64::from(out.height), (f64::from(h) * scale).round() as i64);
    }
}

#[test]
fn scaled_dims_reject_zero_targets() {
    assert!(matches!(
        scaled_dims(size(4, 100), 0.1),
        Err(CanvasError::ParameterOutOfRange {
            field: "scaled_width",
            ..
        })
    ));
    assert!(scaled_dims(size(100, 100), 0.0).is_err());
    assert!(scaled_dims(size(100, 100), -1.0).is_err());
}

#[test]
fn fit_to_canvas_ignores_offsets_and_flags() {
    let params = CanvasParameters {
        fit_to_canvas: true,
        offset_x: 300,
        offset_y: -200,
        center_horizontal: false,
        center_vertical: false,
        ..CanvasParameters::default()
    };
    let scaled = size(1000, 501);
    let (x, y) = placement_offset(&params, scaled, CanvasSize::FULL_HD);
    assert_eq!(x, (1920 - 1000) / 2);
    assert_eq!(y, (1080 - 501) / 2);
}

#[test]
fn fit_to_canvas_floors_negative_gaps() {
    let params = CanvasParameters {
        fit_to_canvas: true,
        ..CanvasParameters::default()
    };
    let (x, y) = placement_offset(&params, size(1925, 1085), CanvasSize::FULL_HD);
    assert_eq!((x, y), (-3, -3));
}

#[test]
fn axes_are_independent() {
    let scaled = size(800, 600);
    let params = CanvasParameters {
        center_horizontal: true,
        offset_x: 123,
        offset_y: 45,
        ..CanvasParameters::default()
    };
    assert_eq!(
        placement_offset(&params, scaled, CanvasSize::FULL_HD),
        (560, -45)
    );

    let params = CanvasParameters {
        center_vertical: true,
        offset_x: 123,
        offset_y: 45,
        ..CanvasParameters::default()
    };
    assert_eq!(
        placement_offset(&params, scaled, CanvasSize::FULL_HD),
        (123, 240)
    );
}

#[test]
fn manual_offsets_clamp_to_half_canvas_and_invert_vertical() {
    let scaled = size(10, 10);
    let params = CanvasParameters {
        offset_x: 5000,
        offset_y: -5000,
        ..CanvasParameters::default()
    };
    assert_eq!(
        placement_offset(&params, scaled, CanvasSize::FULL_HD),
        (960, 540)
    );

    let params = CanvasParameters {
        offset_x: -5000,
        offset_y: 100,
        ..CanvasParameters::default()
    };
    assert_eq!(
        placement_offset(&params, scaled, CanvasSize::FULL_HD),
        (-960, -100)
    );
}

#[test]
fn place_combines_scale_and_offset() {
    let params = CanvasParameters {
        fit_to_canvas: true,
        ..CanvasParameters::default()
    };
    let p = place(&params, size(1920, 1080), 1.0, CanvasSize::FULL_HD).unwrap();
    assert_eq!(
        p,
        Placement {
            x: 0,
            y: 0,
            size: CanvasSize::FULL_HD
        }
    );
}
