use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{MemeError, MemeResult};

/// Tunable caption parameters.
///
/// Every field has a default, so a JSON style file only needs the keys it changes:
///
/// ```json
/// { "max_font_px": 72.0, "stroke_rgba": [32, 0, 64, 255] }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionStyle {
    /// Font size as a fraction of the draw width, before clamping.
    pub font_scale: f64,
    /// Smallest caption size in pixels.
    pub min_font_px: f64,
    /// Largest caption size in pixels.
    pub max_font_px: f64,
    /// Maximum line width as a fraction of the draw width.
    pub wrap_ratio: f64,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_height: f64,
    /// Thinnest outline in pixels.
    pub min_stroke_px: f64,
    /// Outline width is `font_size / stroke_divisor` above the minimum.
    pub stroke_divisor: f64,
    /// Minimum gap above the top caption.
    pub top_inset_min_px: f64,
    /// Gap above the top caption as a fraction of the font size.
    pub top_inset_ratio: f64,
    /// Minimum gap below the bottom caption.
    pub bottom_inset_min_px: f64,
    /// Gap below the bottom caption as a fraction of the font size.
    pub bottom_inset_ratio: f64,
    /// Glyph fill color, straight-alpha RGBA8.
    pub fill_rgba: [u8; 4],
    /// Glyph outline color, straight-alpha RGBA8.
    pub stroke_rgba: [u8; 4],
    /// Family names appended after the loaded face in the shaping stack.
    ///
    /// Only the caption font is registered with the shaper and no system fonts are scanned, so
    /// names that do not match it resolve to nothing and every glyph comes from the loaded face.
    pub font_families: Vec<String>,
    /// Uppercase captions before layout.
    pub uppercase: bool,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_scale: 0.1,
            min_font_px: 20.0,
            max_font_px: 60.0,
            wrap_ratio: 0.9,
            line_height: 1.1,
            min_stroke_px: 2.0,
            stroke_divisor: 20.0,
            top_inset_min_px: 10.0,
            top_inset_ratio: 0.1,
            bottom_inset_min_px: 20.0,
            bottom_inset_ratio: 0.4,
            fill_rgba: [255, 255, 255, 255],
            stroke_rgba: [0, 0, 0, 255],
            font_families: vec![
                "Alfa Slab One".to_string(),
                "Impact".to_string(),
                "sans-serif".to_string(),
            ],
            uppercase: true,
        }
    }
}

impl CaptionStyle {
    /// Parse a JSON style document and validate it.
    pub fn from_json_str(s: &str) -> MemeResult<Self> {
        let style: Self = serde_json::from_str(s)
            .map_err(|e| MemeError::validation(format!("invalid caption style json: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Read a JSON style file and validate it.
    pub fn from_path(path: &Path) -> MemeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read caption style '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check ranges.
    pub fn validate(&self) -> MemeResult<()> {
        let positive = [
            ("font_scale", self.font_scale),
            ("min_font_px", self.min_font_px),
            ("max_font_px", self.max_font_px),
            ("wrap_ratio", self.wrap_ratio),
            ("line_height", self.line_height),
            ("stroke_divisor", self.stroke_divisor),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(MemeError::validation(format!(
                    "caption style '{name}' must be finite and > 0 (got {v})"
                )));
            }
        }
        let non_negative = [
            ("min_stroke_px", self.min_stroke_px),
            ("top_inset_min_px", self.top_inset_min_px),
            ("top_inset_ratio", self.top_inset_ratio),
            ("bottom_inset_min_px", self.bottom_inset_min_px),
            ("bottom_inset_ratio", self.bottom_inset_ratio),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(MemeError::validation(format!(
                    "caption style '{name}' must be finite and >= 0 (got {v})"
                )));
            }
        }
        if self.min_font_px > self.max_font_px {
            return Err(MemeError::validation(
                "caption style 'min_font_px' must be <= 'max_font_px'",
            ));
        }
        if self.wrap_ratio > 1.0 {
            return Err(MemeError::validation(
                "caption style 'wrap_ratio' must be <= 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/style.rs"]
mod tests;
