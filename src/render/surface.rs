use crate::foundation::core::unpremultiply_rgba8_in_place;

/// Pixel buffer that receives the composited frame.
///
/// Pixels are **premultiplied** RGBA8, tightly packed, row-major, as produced by `vello_cpu`.
/// Every redraw replaces the whole buffer; nothing carries over between frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Empty 0x0 surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` for a 0-area surface.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied RGBA8 value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy of the pixels with alpha un-premultiplied (what PNG expects).
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Resize to `width x height` and clear every pixel to transparent.
    pub(crate) fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data
            .resize((width as usize) * (height as usize) * 4, 0);
    }

    /// Overwrite with a freshly rendered frame. `data` must hold `width * height * 4` bytes.
    pub(crate) fn replace(&mut self, width: u32, height: u32, data: Vec<u8>) {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize) * 4);
        self.width = width;
        self.height = height;
        self.data = data;
    }
}
