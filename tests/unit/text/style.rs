use super::*;

#[test]
fn default_is_valid() {
    CaptionStyle::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let style = CaptionStyle::from_json_str(r#"{ "max_font_px": 72.0, "uppercase": false }"#)
        .unwrap();
    assert_eq!(style.max_font_px, 72.0);
    assert!(!style.uppercase);
    assert_eq!(style.min_font_px, 20.0);
    assert_eq!(style.fill_rgba, [255, 255, 255, 255]);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = CaptionStyle::from_json_str(r#"{ "font_sise": 3 }"#).unwrap_err();
    assert!(matches!(err, MemeError::Validation(_)));
}

#[test]
fn out_of_range_values_are_rejected() {
    for json in [
        r#"{ "font_scale": 0 }"#,
        r#"{ "min_font_px": 80, "max_font_px": 60 }"#,
        r#"{ "wrap_ratio": 1.5 }"#,
        r#"{ "line_height": -1 }"#,
        r#"{ "bottom_inset_ratio": -0.1 }"#,
    ] {
        assert!(CaptionStyle::from_json_str(json).is_err(), "{json}");
    }
}

#[test]
fn from_path_reports_missing_file() {
    let err = CaptionStyle::from_path(Path::new("target/no-such-style.json")).unwrap_err();
    assert!(err.to_string().contains("read caption style"));
}
