use crate::text::style::CaptionStyle;

/// The two caption strings of a session. Empty means "not set".
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Captions {
    /// Caption anchored to the top edge.
    pub top: String,
    /// Caption anchored to the bottom edge.
    pub bottom: String,
}

impl Captions {
    /// Build from both strings.
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// `true` when neither caption is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }
}

/// Size-dependent caption geometry for one draw width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionMetrics {
    /// Font size in pixels.
    pub font_size: f64,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Wrap limit in pixels.
    pub max_line_width: f64,
    /// Baseline-to-baseline distance in pixels.
    pub line_advance: f64,
    /// Horizontal center of every line.
    pub center_x: f64,
}

/// Derive font size, outline width and wrap limit from the draw width.
pub fn caption_metrics(style: &CaptionStyle, draw_width: f64) -> CaptionMetrics {
    let font_size = (draw_width * style.font_scale).clamp(style.min_font_px, style.max_font_px);
    CaptionMetrics {
        font_size,
        stroke_width: style.min_stroke_px.max(font_size / style.stroke_divisor),
        max_line_width: draw_width * style.wrap_ratio,
        line_advance: font_size * style.line_height,
        center_x: draw_width / 2.0,
    }
}

/// Baselines for a top-anchored block, first line first.
pub fn top_baselines(style: &CaptionStyle, m: &CaptionMetrics, line_count: usize) -> Vec<f64> {
    let first = m.font_size + style.top_inset_min_px.max(m.font_size * style.top_inset_ratio);
    (0..line_count)
        .map(|i| first + i as f64 * m.line_advance)
        .collect()
}

/// Baselines for a bottom-anchored block, first line first.
///
/// The block starts `line_count` advances above the bottom edge, so the last baseline lands at
/// `draw_height - (line_advance - font_size) - inset` and earlier lines stack upward.
pub fn bottom_baselines(
    style: &CaptionStyle,
    m: &CaptionMetrics,
    draw_height: f64,
    line_count: usize,
) -> Vec<f64> {
    let inset = style
        .bottom_inset_min_px
        .max(m.font_size * style.bottom_inset_ratio);
    let first = draw_height - line_count as f64 * m.line_advance + m.font_size - inset;
    (0..line_count)
        .map(|i| first + i as f64 * m.line_advance)
        .collect()
}

/// Apply the style's casing to a caption.
pub fn prepare_caption(style: &CaptionStyle, text: &str) -> String {
    if style.uppercase {
        text.to_uppercase()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/caption.rs"]
mod tests;
