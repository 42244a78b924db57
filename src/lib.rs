//! memeforge renders captioned images: a photo scaled into a drawing area with outlined caption
//! text along its top and bottom edges, exported as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: image bytes -> [`SourceImage`] (premultiplied RGBA8), synchronously or through
//!    a background [`ImageLoad`]
//! 2. **Fit**: image size + container size -> [`DrawRect`] (contain-fit, aspect preserved)
//! 3. **Compose**: [`Compositor::render_frame`] stretches the image over the rect, wraps both
//!    captions greedily and draws them filled and outlined into a [`Surface`]
//! 4. **Export**: [`encode_png`] / [`MemeSession::export_png`] -> `meme-<unix-millis>.png`
//!
//! [`MemeSession`] ties the steps together: it owns the current image, captions and surface and
//! repaints after every change.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Full repaints**: every redraw starts from a cleared surface; identical inputs give
//!   identical pixels.
//! - **No IO in the compositor**: fonts and images are loaded up front.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod layout;
mod render;
mod session;
mod text;

pub use assets::decode::{SourceImage, decode_image, decode_image_file};
pub use assets::font::{
    CaptionFont, FONT_ENV_VAR, TextBrushRgba8, TextLayoutEngine, default_font_candidates,
    font_stack_source,
};
pub use assets::load::ImageLoad;
pub use encode::png::{Export, encode_png, export_file_name, export_surface, unix_millis_now};
pub use foundation::core::{Affine, Size, parse_size};
pub use foundation::error::{MemeError, MemeResult};
pub use layout::fit::{DrawRect, compute_draw_rect, fit_image};
pub use render::cpu::{Compositor, PlacedLine};
pub use render::surface::Surface;
pub use session::MemeSession;
pub use text::caption::{
    CaptionMetrics, Captions, bottom_baselines, caption_metrics, prepare_caption, top_baselines,
};
pub use text::style::CaptionStyle;
pub use text::wrap::{MeasureText, wrap_text};
