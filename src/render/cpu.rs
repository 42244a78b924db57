use std::sync::Arc;

use crate::{
    assets::decode::SourceImage,
    assets::font::{CaptionFont, TextBrushRgba8, font_stack_source},
    foundation::core::Affine,
    foundation::error::{MemeError, MemeResult},
    layout::fit::DrawRect,
    render::surface::Surface,
    text::caption::{
        CaptionMetrics, Captions, bottom_baselines, caption_metrics, prepare_caption,
        top_baselines,
    },
    text::style::CaptionStyle,
    text::wrap::wrap_text,
};

/// One wrapped caption line and where its baseline goes.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Line text, already cased.
    pub text: String,
    /// Baseline y in surface pixels.
    pub baseline: f64,
}

/// CPU caption compositor powered by `vello_cpu`, with Parley for shaping and measurement.
///
/// Each call to [`Compositor::render_frame`] repaints the whole surface from scratch: the source
/// image stretched over the draw rect, then the top block, then the bottom block. Glyphs are
/// filled first and outlined second.
pub struct Compositor {
    style: CaptionStyle,
    font: Option<CaptionFont>,
    ctx: Option<vello_cpu::RenderContext>,
    image_cache: Option<CachedImage>,
}

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// Paint for the last drawn source, keyed by its pixel buffer identity.
struct CachedImage {
    key: Arc<Vec<u8>>,
    paint: ImagePaint,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("style", &self.style)
            .field("font", &self.font)
            .finish()
    }
}

impl Compositor {
    /// Build a compositor. Without a font, only caption-free frames can be rendered.
    pub fn new(style: CaptionStyle, font: Option<CaptionFont>) -> MemeResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            font,
            ctx: None,
            image_cache: None,
        })
    }

    /// Active caption style.
    pub fn style(&self) -> &CaptionStyle {
        &self.style
    }

    /// Replace the caption style.
    pub fn set_style(&mut self, style: CaptionStyle) -> MemeResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Loaded caption font, if any.
    pub fn font(&self) -> Option<&CaptionFont> {
        self.font.as_ref()
    }

    /// Replace the caption font.
    pub fn set_font(&mut self, font: Option<CaptionFont>) {
        self.font = font;
    }

    /// Wrap and place both captions for a `draw_width x draw_height` frame.
    ///
    /// Returns an empty list when neither caption is set; otherwise needs a caption font.
    pub fn layout_captions(
        &mut self,
        captions: &Captions,
        draw_width: f64,
        draw_height: f64,
    ) -> MemeResult<Vec<PlacedLine>> {
        let metrics = caption_metrics(&self.style, draw_width);
        let font = match (&mut self.font, captions.is_empty()) {
            (_, true) => return Ok(Vec::new()),
            (Some(font), false) => font,
            (None, false) => {
                return Err(MemeError::environment(
                    "captions are set but no caption font is loaded",
                ));
            }
        };
        Ok(place_captions(
            &self.style,
            font,
            &metrics,
            captions,
            draw_height,
        ))
    }

    /// Repaint `surface` with `image` scaled to `rect` and the two captions on top.
    ///
    /// An empty `rect` leaves a 0x0 surface and draws nothing. On error the surface is left as
    /// it was.
    #[tracing::instrument(skip_all, fields(width = rect.width, height = rect.height))]
    pub fn render_frame(
        &mut self,
        surface: &mut Surface,
        image: &SourceImage,
        rect: DrawRect,
        captions: &Captions,
    ) -> MemeResult<()> {
        let (w, h) = rect.pixel_size();
        if w == 0 || h == 0 {
            tracing::debug!("empty draw rect, nothing to draw");
            surface.reset(0, 0);
            return Ok(());
        }
        let (w16, h16) = surface_dims(w, h)?;
        let source = self.image_paint_for(image)?;

        let lines = self.layout_captions(captions, f64::from(w), f64::from(h))?;
        let metrics = caption_metrics(&self.style, f64::from(w));

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w16 && ctx.height() == h16 => ctx,
            _ => vello_cpu::RenderContext::new(w16, h16),
        };
        ctx.reset();

        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(Affine::scale_non_uniform(
            f64::from(w) / f64::from(source.w),
            f64::from(h) / f64::from(source.h),
        )));
        ctx.set_paint(source.paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(source.w),
            f64::from(source.h),
        ));

        if let Some(font) = self.font.as_mut()
            && !lines.is_empty()
        {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            draw_lines(&mut ctx, &self.style, font, &metrics, &lines);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        surface.replace(w, h, pixmap.data_as_u8_slice().to_vec());
        tracing::debug!(lines = lines.len(), "frame rendered");
        Ok(())
    }

    fn image_paint_for(&mut self, image: &SourceImage) -> MemeResult<ImagePaint> {
        if let Some(cached) = &self.image_cache
            && Arc::ptr_eq(&cached.key, &image.rgba8_premul)
        {
            return Ok(cached.paint.clone());
        }
        let paint = image_paint(image)?;
        self.image_cache = Some(CachedImage {
            key: Arc::clone(&image.rgba8_premul),
            paint: paint.clone(),
        });
        Ok(paint)
    }
}

fn place_captions(
    style: &CaptionStyle,
    font: &mut CaptionFont,
    metrics: &CaptionMetrics,
    captions: &Captions,
    draw_height: f64,
) -> Vec<PlacedLine> {
    let stack = font_stack_source(font.family_name(), &style.font_families);
    let size_px = metrics.font_size as f32;
    let engine = font.engine_mut();
    let mut measure = |s: &str| -> f64 {
        f64::from(
            engine
                .layout_line(s, &stack, size_px, TextBrushRgba8::default())
                .width(),
        )
    };

    let mut out = Vec::new();
    if !captions.top.is_empty() {
        let lines = wrap_text(
            &prepare_caption(style, &captions.top),
            metrics.max_line_width,
            &mut measure,
        );
        let ys = top_baselines(style, metrics, lines.len());
        out.extend(
            lines
                .into_iter()
                .zip(ys)
                .map(|(text, baseline)| PlacedLine { text, baseline }),
        );
    }
    if !captions.bottom.is_empty() {
        let lines = wrap_text(
            &prepare_caption(style, &captions.bottom),
            metrics.max_line_width,
            &mut measure,
        );
        let ys = bottom_baselines(style, metrics, draw_height, lines.len());
        out.extend(
            lines
                .into_iter()
                .zip(ys)
                .map(|(text, baseline)| PlacedLine { text, baseline }),
        );
    }
    tracing::debug!(
        font_size = metrics.font_size,
        max_line_width = metrics.max_line_width,
        lines = out.len(),
        "captions wrapped"
    );
    out
}

fn draw_lines(
    ctx: &mut vello_cpu::RenderContext,
    style: &CaptionStyle,
    font: &mut CaptionFont,
    metrics: &CaptionMetrics,
    lines: &[PlacedLine],
) {
    let stack = font_stack_source(font.family_name(), &style.font_families);
    let size_px = metrics.font_size as f32;
    let [fr, fg, fb, fa] = style.fill_rgba;
    let [sr, sg, sb, sa] = style.stroke_rgba;

    for line in lines {
        let layout =
            font.engine_mut()
                .layout_line(&line.text, &stack, size_px, TextBrushRgba8::default());
        let x0 = metrics.center_x - f64::from(layout.width()) / 2.0;

        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(fr, fg, fb, fa));
        ctx.glyph_run(font.font_data())
            .font_size(size_px)
            .fill_glyphs(line_glyphs(&layout, x0, line.baseline).into_iter());

        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(sr, sg, sb, sa));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(metrics.stroke_width));
        ctx.glyph_run(font.font_data())
            .font_size(size_px)
            .stroke_glyphs(line_glyphs(&layout, x0, line.baseline).into_iter());
    }
}

/// Absolute glyph positions for a single-line layout whose left edge is `x0`.
fn line_glyphs(
    layout: &parley::Layout<TextBrushRgba8>,
    x0: f64,
    baseline: f64,
) -> Vec<vello_cpu::Glyph> {
    let mut out = Vec::new();
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let dy = baseline as f32 - run.baseline();
            out.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: x0 as f32 + g.x,
                y: dy + g.y,
            }));
        }
    }
    out
}

fn surface_dims(width: u32, height: u32) -> MemeResult<(u16, u16)> {
    let w: u16 = width.try_into().map_err(|_| {
        MemeError::environment(format!("surface width {width} exceeds {}", u16::MAX))
    })?;
    let h: u16 = height.try_into().map_err(|_| {
        MemeError::environment(format!("surface height {height} exceeds {}", u16::MAX))
    })?;
    Ok((w, h))
}

/// Sources larger than the rasterizer's `u16` pixmap bound are downscaled to fit it first.
fn image_paint(image: &SourceImage) -> MemeResult<ImagePaint> {
    let limit = u32::from(u16::MAX);
    let (pixmap, w, h) = if image.width <= limit && image.height <= limit {
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        (pixmap, image.width, image.height)
    } else {
        let long = u64::from(image.width.max(image.height));
        let fit = |v: u32| {
            (u64::from(v) * u64::from(limit) / long).clamp(1, u64::from(limit)) as u32
        };
        let (w, h) = (fit(image.width), fit(image.height));
        tracing::debug!(
            from_width = image.width,
            from_height = image.height,
            width = w,
            height = h,
            "downscaling oversized source image"
        );
        let full =
            image::RgbaImage::from_raw(image.width, image.height, image.rgba8_premul.to_vec())
                .ok_or_else(|| MemeError::validation("image byte len mismatch"))?;
        // Premultiplied in, premultiplied out.
        let small = image::imageops::resize(&full, w, h, image::imageops::FilterType::Triangle);
        (pixmap_from_premul_bytes(small.as_raw(), w, h)?, w, h)
    };
    Ok(ImagePaint {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        w,
        h,
    })
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> MemeResult<vello_cpu::Pixmap> {
    let (w, h) = surface_dims(width, height)?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MemeError::validation("image byte len mismatch"));
    }
    // Bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
