use crate::foundation::error::{MemeError, MemeResult};

pub use kurbo::{Affine, Size};

/// Parse a `WIDTHxHEIGHT` pair such as `600x600` or `1920X1080.5`.
pub fn parse_size(s: &str) -> MemeResult<Size> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| MemeError::validation(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
    let parse = |v: &str, axis: &str| -> MemeResult<f64> {
        let n: f64 = v
            .trim()
            .parse()
            .map_err(|_| MemeError::validation(format!("invalid {axis} '{v}' in '{s}'")))?;
        if !n.is_finite() || n < 0.0 {
            return Err(MemeError::validation(format!(
                "{axis} must be finite and >= 0 in '{s}'"
            )));
        }
        Ok(n)
    };
    Ok(Size::new(parse(w, "width")?, parse(h, "height")?))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
