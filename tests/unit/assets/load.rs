use std::io::Cursor;

use super::*;

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn wait_resolves_to_image() {
    let img = ImageLoad::spawn(tiny_png()).wait().unwrap();
    assert_eq!((img.width, img.height), (3, 2));
}

#[test]
fn wait_reports_decode_failure() {
    let err = ImageLoad::spawn(b"nope".to_vec()).wait().unwrap_err();
    assert!(matches!(err, MemeError::Decode(_)));
}

#[test]
fn try_take_resolves_exactly_once() {
    let mut load = ImageLoad::spawn(tiny_png());
    let res = loop {
        if let Some(res) = load.try_take() {
            break res;
        }
        std::thread::yield_now();
    };
    assert!(res.is_ok());
    assert!(load.is_resolved());
    assert!(load.try_take().is_none());
}
