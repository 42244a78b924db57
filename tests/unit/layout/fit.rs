use super::*;

#[test]
fn landscape_in_square_is_width_limited() {
    let r = compute_draw_rect(1920.0, 1080.0, 600.0, 600.0);
    assert_eq!(r.width, 600.0);
    assert!((r.height - 337.5).abs() < 1e-9);
    assert_eq!(r.pixel_size(), (600, 337));
}

#[test]
fn portrait_in_square_is_height_limited() {
    let r = compute_draw_rect(1080.0, 1920.0, 600.0, 600.0);
    assert_eq!(r.height, 600.0);
    assert!((r.width - 337.5).abs() < 1e-9);
    assert_eq!(r.pixel_size(), (337, 600));
}

#[test]
fn same_ratio_fills_container_exactly() {
    let r = compute_draw_rect(400.0, 300.0, 800.0, 600.0);
    assert_eq!(r, DrawRect { width: 800.0, height: 600.0 });
}

#[test]
fn small_image_is_upscaled_to_fit() {
    let r = fit_image(10, 20, Size::new(100.0, 100.0));
    assert_eq!(r, DrawRect { width: 50.0, height: 100.0 });
}

#[test]
fn degenerate_inputs_yield_zero_rect() {
    for (iw, ih, cw, ch) in [
        (0.0, 10.0, 10.0, 10.0),
        (10.0, 0.0, 10.0, 10.0),
        (10.0, 10.0, 0.0, 10.0),
        (10.0, 10.0, 10.0, -5.0),
        (f64::NAN, 10.0, 10.0, 10.0),
        (10.0, 10.0, f64::INFINITY, 10.0),
    ] {
        let r = compute_draw_rect(iw, ih, cw, ch);
        assert_eq!(r, DrawRect::ZERO);
        assert!(r.is_empty());
    }
}

#[test]
fn sub_pixel_rect_is_empty() {
    let r = compute_draw_rect(1000.0, 1.0, 100.0, 100.0);
    assert_eq!(r.width, 100.0);
    assert!(r.height < 1.0);
    assert!(r.is_empty());
}

#[test]
fn bounds_and_ratio_hold_across_a_grid() {
    let dims = [1.0, 3.0, 17.0, 100.0, 333.0, 1080.0, 1920.0, 4000.0, 12345.0];
    for &iw in &dims {
        for &ih in &dims {
            for &cw in &dims {
                for &ch in &dims {
                    let r = compute_draw_rect(iw, ih, cw, ch);
                    assert!(r.width <= cw, "{iw}x{ih} in {cw}x{ch}: {r:?}");
                    assert!(r.height <= ch, "{iw}x{ih} in {cw}x{ch}: {r:?}");
                    let want = iw / ih;
                    let got = r.width / r.height;
                    assert!(
                        ((got - want) / want).abs() < 1e-9,
                        "{iw}x{ih} in {cw}x{ch}: ratio {got} vs {want}"
                    );
                    // One axis always touches the container.
                    assert!(r.width == cw || r.height == ch);
                }
            }
        }
    }
}
