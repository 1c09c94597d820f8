use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));

    let c: Color = serde_json::from_value(json!("0000ff80")).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 128));
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c, Color::rgb(255, 128, 0));

    let c: Color = serde_json::from_value(json!([0.0, 0.0, 1.0, 0.0])).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 0));

    assert!(serde_json::from_value::<Color>(json!([1.0, 2.0])).is_err());
}

#[test]
fn rejects_bad_hex() {
    assert!(Color::parse_hex("#12345").is_err());
    assert!(Color::parse_hex("#zz0000").is_err());
}

#[test]
fn hex_serialization_is_stable() {
    assert_eq!(Color::rgb(0x1a, 0x2b, 0x3c).to_hex(), "#1a2b3c");
    assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    let v = serde_json::to_value(Color::rgb(255, 255, 255)).unwrap();
    assert_eq!(v, json!("#ffffff"));
}

#[test]
fn pointer_position_requires_inside_and_finite() {
    assert_eq!(PointerState::at(1.0, 2.0).position(), Some(Point::new(1.0, 2.0)));
    assert_eq!(PointerState::outside().position(), None);
    assert_eq!(PointerState::at(f64::NAN, 2.0).position(), None);
}
