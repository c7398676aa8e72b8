use super::*;

#[test]
fn canvas_size_rejects_zero_dims() {
    assert!(CanvasSize::new(0, 10).is_err());
    assert!(CanvasSize::new(10, 0).is_err());
    assert_eq!(CanvasSize::new(1920, 1080).unwrap(), CanvasSize::FULL_HD);
}

#[test]
fn canvas_size_fits_within_is_per_axis() {
    let bound = CanvasSize::FULL_HD;
    assert!(CanvasSize::new(1920, 1080).unwrap().fits_within(bound));
    assert!(!CanvasSize::new(1921, 10).unwrap().fits_within(bound));
    assert!(!CanvasSize::new(10, 1081).unwrap().fits_within(bound));
}

#[test]
fn hex_parse_accepts_picker_output() {
    assert_eq!(Rgb8::parse_hex("#909090").unwrap(), Rgb8::gray(0x90));
    assert_eq!(Rgb8::parse_hex("FF3366").unwrap(), Rgb8::new(255, 0x33, 0x66));
    assert_eq!("#2d2D2d".parse::<Rgb8>().unwrap(), Rgb8::gray(45));
}

#[test]
fn hex_parse_rejects_bad_input() {
    assert!(Rgb8::parse_hex("#fff").is_err());
    assert!(Rgb8::parse_hex("#gg0000").is_err());
    assert!(Rgb8::parse_hex("#ff00ff00").is_err());
}

#[test]
fn rgb8_serde_accepts_hex_array_and_object() {
    let c: Rgb8 = serde_json::from_str("\"#ff0000\"").unwrap();
    assert_eq!(c, Rgb8::new(255, 0, 0));

    let c: Rgb8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgb8::new(1, 2, 3));

    let c: Rgb8 = serde_json::from_str(r#"{"r": 4, "g": 5, "b": 6}"#).unwrap();
    assert_eq!(c, Rgb8::new(4, 5, 6));

    assert_eq!(serde_json::to_string(&Rgb8::gray(45)).unwrap(), "\"#2d2d2d\"");
}
