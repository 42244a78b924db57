use super::*;

fn system_font() -> Option<PathBuf> {
    default_font_candidates().into_iter().next()
}

#[test]
fn font_stack_quotes_names_but_not_generics() {
    let stack = font_stack_source(
        "DejaVu Sans",
        &[
            "Alfa Slab One".to_string(),
            "Impact".to_string(),
            "sans-serif".to_string(),
        ],
    );
    assert_eq!(
        stack,
        "\"DejaVu Sans\", \"Alfa Slab One\", \"Impact\", sans-serif"
    );
}

#[test]
fn font_stack_skips_duplicates_and_blanks() {
    let stack = font_stack_source("Impact", &["Impact".to_string(), " ".to_string()]);
    assert_eq!(stack, "\"Impact\"");
}

#[test]
fn default_candidates_exist_on_disk() {
    assert!(default_font_candidates().iter().all(|p| p.is_file()));
}

#[test]
fn garbage_bytes_are_rejected() {
    assert!(CaptionFont::from_bytes(b"not a font".to_vec()).is_err());
}

#[test]
fn load_first_with_no_candidates_is_environment_error() {
    let err = CaptionFont::load_first(&[]).unwrap_err();
    assert!(matches!(err, MemeError::Environment(_)));
}

#[test]
fn load_first_skips_missing_files() {
    let Some(font_path) = system_font() else {
        eprintln!("skipping: no test font available");
        return;
    };
    let font = CaptionFont::load_first(&[
        PathBuf::from("target/no-such-font.ttf"),
        font_path.clone(),
    ])
    .unwrap();
    assert_eq!(font.source(), Some(font_path.as_path()));
    assert!(!font.family_name().trim().is_empty());
}

#[test]
fn wider_text_lays_out_wider() {
    let Some(font_path) = system_font() else {
        eprintln!("skipping: no test font available");
        return;
    };
    let mut font = CaptionFont::from_path(&font_path).unwrap();
    let stack = font_stack_source(font.family_name(), &[]);
    let brush = TextBrushRgba8::from([255, 255, 255, 255]);
    let short = font.engine_mut().layout_line("HI", &stack, 40.0, brush);
    let long = font.engine_mut().layout_line("HI THERE", &stack, 40.0, brush);
    assert!(short.width() > 0.0);
    assert!(long.width() > short.width());
}
