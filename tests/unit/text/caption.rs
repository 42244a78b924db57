use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn font_size_is_clamped() {
    let style = CaptionStyle::default();
    assert_eq!(caption_metrics(&style, 100.0).font_size, 20.0);
    assert_eq!(caption_metrics(&style, 450.0).font_size, 45.0);
    assert_eq!(caption_metrics(&style, 2000.0).font_size, 60.0);
}

#[test]
fn stroke_has_a_floor() {
    let style = CaptionStyle::default();
    assert_eq!(caption_metrics(&style, 300.0).stroke_width, 2.0);
    assert_eq!(caption_metrics(&style, 600.0).stroke_width, 3.0);
}

#[test]
fn wrap_limit_and_center_follow_width() {
    let m = caption_metrics(&CaptionStyle::default(), 600.0);
    assert!(approx(m.max_line_width, 540.0));
    assert_eq!(m.center_x, 300.0);
    assert!(approx(m.line_advance, 66.0));
}

#[test]
fn top_block_starts_below_the_edge() {
    let style = CaptionStyle::default();
    let m = caption_metrics(&style, 600.0);
    let ys = top_baselines(&style, &m, 3);
    assert!(approx(ys[0], 70.0));
    assert!(approx(ys[1], 136.0));
    assert!(approx(ys[2], 202.0));

    // Small fonts use the 10px minimum gap.
    let m = caption_metrics(&style, 200.0);
    assert!(approx(top_baselines(&style, &m, 1)[0], 30.0));
}

#[test]
fn bottom_block_last_line_is_pinned() {
    let style = CaptionStyle::default();
    let m = caption_metrics(&style, 600.0);
    for n in 1..5 {
        let ys = bottom_baselines(&style, &m, 400.0, n);
        assert_eq!(ys.len(), n);
        // 400 - (66 - 60) - max(20, 24)
        assert!(approx(*ys.last().unwrap(), 370.0), "{ys:?}");
        for pair in ys.windows(2) {
            assert!(approx(pair[1] - pair[0], m.line_advance));
        }
    }
}

#[test]
fn zero_lines_yield_no_baselines() {
    let style = CaptionStyle::default();
    let m = caption_metrics(&style, 600.0);
    assert!(top_baselines(&style, &m, 0).is_empty());
    assert!(bottom_baselines(&style, &m, 400.0, 0).is_empty());
}

#[test]
fn casing_follows_style() {
    let mut style = CaptionStyle::default();
    assert_eq!(prepare_caption(&style, "héllo"), "HÉLLO");
    style.uppercase = false;
    assert_eq!(prepare_caption(&style, "héllo"), "héllo");
}

#[test]
fn captions_emptiness() {
    assert!(Captions::default().is_empty());
    assert!(!Captions::new("", "x").is_empty());
}
