use crate::{
    assets::decode::{SourceImage, decode_image},
    assets::load::ImageLoad,
    encode::png::{Export, export_surface, unix_millis_now},
    foundation::core::Size,
    foundation::error::MemeResult,
    layout::fit::{DrawRect, fit_image},
    render::cpu::Compositor,
    render::surface::Surface,
    text::caption::Captions,
};

/// Explicit state of one captioning session.
///
/// The host owns the session and feeds it user actions. Every mutating call recomputes the
/// draw rect and repaints the surface from scratch before returning, so [`MemeSession::surface`]
/// always reflects the latest inputs. A call whose redraw fails leaves image, captions, container
/// and frame exactly as they were and returns the error, so the session stays usable afterwards.
#[derive(Debug)]
pub struct MemeSession {
    compositor: Compositor,
    container: Size,
    image: Option<SourceImage>,
    captions: Captions,
    rect: DrawRect,
    surface: Surface,
}

impl MemeSession {
    /// New session with no image, empty captions, drawing into `container`.
    pub fn new(compositor: Compositor, container: Size) -> Self {
        Self {
            compositor,
            container,
            image: None,
            captions: Captions::default(),
            rect: DrawRect::ZERO,
            surface: Surface::new(),
        }
    }

    /// Current source image.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Current captions.
    pub fn captions(&self) -> &Captions {
        &self.captions
    }

    /// Available drawing area.
    pub fn container(&self) -> Size {
        self.container
    }

    /// Draw rect used by the last redraw.
    pub fn draw_rect(&self) -> DrawRect {
        self.rect
    }

    /// Last rendered frame.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Compositor used for redraws.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Mutable compositor access (style or font changes). Call [`MemeSession::redraw`] after.
    pub fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }

    /// Decode `bytes` synchronously and make the result the current image.
    ///
    /// On a decode failure the previous image (if any) is kept.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> MemeResult<()> {
        self.apply_load(decode_image(bytes))
    }

    /// Start a background decode. Feed its result to [`MemeSession::apply_load`].
    pub fn begin_load(&self, bytes: Vec<u8>) -> ImageLoad {
        ImageLoad::spawn(bytes)
    }

    /// Apply a resolved load.
    ///
    /// Success replaces the current image and redraws. If the decode failed, or the new image
    /// cannot be drawn, the session keeps its previous image and frame and returns the error.
    /// Results applied later win over earlier ones.
    #[tracing::instrument(skip_all)]
    pub fn apply_load(&mut self, result: MemeResult<SourceImage>) -> MemeResult<()> {
        let image = result.inspect_err(|e| {
            tracing::warn!(error = %e, "image load failed, keeping previous image");
        })?;
        tracing::debug!(width = image.width, height = image.height, "image loaded");
        let prev = self.image.replace(image);
        if let Err(e) = self.redraw() {
            tracing::warn!(error = %e, "loaded image could not be drawn, keeping previous image");
            self.image = prev;
            return Err(e);
        }
        Ok(())
    }

    /// Replace the top caption and redraw. On failure the previous caption is kept.
    pub fn set_top_text(&mut self, text: impl Into<String>) -> MemeResult<()> {
        let mut captions = self.captions.clone();
        captions.top = text.into();
        self.set_captions(captions)
    }

    /// Replace the bottom caption and redraw. On failure the previous caption is kept.
    pub fn set_bottom_text(&mut self, text: impl Into<String>) -> MemeResult<()> {
        let mut captions = self.captions.clone();
        captions.bottom = text.into();
        self.set_captions(captions)
    }

    /// Replace both captions and redraw once. On failure the previous captions are kept.
    pub fn set_captions(&mut self, captions: Captions) -> MemeResult<()> {
        let prev = std::mem::replace(&mut self.captions, captions);
        if let Err(e) = self.redraw() {
            self.captions = prev;
            return Err(e);
        }
        Ok(())
    }

    /// Resize the available drawing area and redraw. On failure the previous size is kept.
    pub fn set_container(&mut self, container: Size) -> MemeResult<()> {
        let prev = std::mem::replace(&mut self.container, container);
        if let Err(e) = self.redraw() {
            self.container = prev;
            return Err(e);
        }
        Ok(())
    }

    /// Recompute the draw rect and repaint. Without an image this does nothing.
    pub fn redraw(&mut self) -> MemeResult<()> {
        let Some(image) = self.image.as_ref() else {
            return Ok(());
        };
        let rect = fit_image(image.width, image.height, self.container);
        self.compositor
            .render_frame(&mut self.surface, image, rect, &self.captions)?;
        self.rect = rect;
        Ok(())
    }

    /// Encode the current surface as `meme-<unix-millis>.png`.
    ///
    /// Returns `Ok(None)` when there is nothing to export (no image, or an empty frame).
    pub fn export_png(&self) -> MemeResult<Option<Export>> {
        self.export_png_at(unix_millis_now())
    }

    /// [`MemeSession::export_png`] with an explicit timestamp for the file name.
    pub fn export_png_at(&self, unix_millis: u128) -> MemeResult<Option<Export>> {
        if self.image.is_none() || self.surface.is_empty() {
            tracing::debug!("export requested with nothing to export");
            return Ok(None);
        }
        export_surface(&self.surface, unix_millis).map(Some)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
