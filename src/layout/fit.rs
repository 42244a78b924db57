use crate::foundation::core::Size;

/// Pixel region occupied by the scaled source image for one render pass.
///
/// Always recomputed from the image and container sizes; never stored across redraws.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawRect {
    /// Width in (fractional) pixels.
    pub width: f64,
    /// Height in (fractional) pixels.
    pub height: f64,
}

impl DrawRect {
    /// Zero-sized rectangle: nothing to draw.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Whole-pixel surface size, truncating toward zero.
    pub fn pixel_size(self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// `true` when the rectangle covers no whole pixel on either axis.
    pub fn is_empty(self) -> bool {
        let (w, h) = self.pixel_size();
        w == 0 || h == 0
    }

    /// As a `kurbo` size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Contain-fit an image of `image_width x image_height` inside a container.
///
/// Width is fitted first; when the derived height overflows the container, height is fitted
/// instead. The result is the largest rectangle with the image's aspect ratio that fits entirely
/// inside the container. Non-positive or non-finite inputs yield [`DrawRect::ZERO`].
pub fn compute_draw_rect(
    image_width: f64,
    image_height: f64,
    container_width: f64,
    container_height: f64,
) -> DrawRect {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(image_width)
        && valid(image_height)
        && valid(container_width)
        && valid(container_height))
    {
        return DrawRect::ZERO;
    }

    let ratio = image_width / image_height;
    let mut width = container_width;
    let mut height = container_width / ratio;
    if height > container_height {
        height = container_height;
        width = container_height * ratio;
    }
    // Guard the rare case where `h * r` rounds a hair past the container.
    DrawRect {
        width: width.min(container_width),
        height: height.min(container_height),
    }
}

/// [`compute_draw_rect`] for integer image dimensions and a `kurbo` container size.
pub fn fit_image(image_width: u32, image_height: u32, container: Size) -> DrawRect {
    compute_draw_rect(
        f64::from(image_width),
        f64::from(image_height),
        container.width,
        container.height,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
