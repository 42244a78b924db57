use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{MemeError, MemeResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Stateful helper for building single-line Parley layouts against one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` with a fresh Parley font context.
    pub fn from_font_bytes(font_bytes: &[u8]) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| MemeError::validation("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name read from the registered font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` as one unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        font_stack: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font_stack.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Caption typeface: Parley shaping state plus the raw font data the rasterizer draws with.
pub struct CaptionFont {
    engine: TextLayoutEngine,
    font_data: vello_cpu::peniko::FontData,
    source: Option<PathBuf>,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("family", &self.engine.family_name())
            .field("source", &self.source)
            .finish()
    }
}

impl CaptionFont {
    /// Build from in-memory TrueType/OpenType bytes.
    pub fn from_bytes(font_bytes: Vec<u8>) -> MemeResult<Self> {
        let engine = TextLayoutEngine::from_font_bytes(&font_bytes)?;
        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            engine,
            font_data,
            source: None,
        })
    }

    /// Read and register a font file.
    pub fn from_path(path: &Path) -> MemeResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let mut font = Self::from_bytes(bytes)?;
        font.source = Some(path.to_path_buf());
        Ok(font)
    }

    /// Load the first usable font from `candidates`, in order.
    ///
    /// Unreadable or unparsable candidates are skipped with a warning; the last failure is
    /// returned when none loads.
    pub fn load_first(candidates: &[PathBuf]) -> MemeResult<Self> {
        let mut last_err = None;
        for path in candidates {
            match Self::from_path(path) {
                Ok(font) => {
                    tracing::debug!(
                        path = %path.display(),
                        family = font.family_name(),
                        "caption font loaded"
                    );
                    return Ok(font);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping caption font");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| MemeError::environment("no caption font candidates given")))
    }

    /// Family name of the loaded face.
    pub fn family_name(&self) -> &str {
        self.engine.family_name()
    }

    /// File the font was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }

    pub(crate) fn engine_mut(&mut self) -> &mut TextLayoutEngine {
        &mut self.engine
    }
}

/// Environment variable naming a caption font file tried before the built-in candidates.
pub const FONT_ENV_VAR: &str = "MEMEFORGE_FONT";

/// Caption font files tried in order when the caller names none: `$MEMEFORGE_FONT`, then Impact,
/// then common bold sans faces.
pub fn default_font_candidates() -> Vec<PathBuf> {
    const WELL_KNOWN: &[&str] = &[
        "/usr/share/fonts/truetype/msttcorefonts/Impact.ttf",
        "/System/Library/Fonts/Supplemental/Impact.ttf",
        "/Library/Fonts/Impact.ttf",
        "C:\\Windows\\Fonts\\impact.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ];
    std::env::var_os(FONT_ENV_VAR)
        .map(PathBuf::from)
        .into_iter()
        .chain(WELL_KNOWN.iter().map(PathBuf::from))
        .filter(|p| p.is_file())
        .collect()
}

/// Build a CSS-style font stack with the loaded family first, then `fallbacks`.
///
/// Generic family keywords (`sans-serif`, `serif`, ...) are left unquoted.
pub fn font_stack_source(primary: &str, fallbacks: &[String]) -> String {
    const GENERIC: &[&str] = &[
        "serif",
        "sans-serif",
        "monospace",
        "cursive",
        "fantasy",
        "system-ui",
    ];
    let mut out = Vec::with_capacity(fallbacks.len() + 1);
    out.push(format!("\"{primary}\""));
    for name in fallbacks {
        let name = name.trim();
        if name.is_empty() || name == primary {
            continue;
        }
        if GENERIC.contains(&name) {
            out.push(name.to_string());
        } else {
            out.push(format!("\"{name}\""));
        }
    }
    out.join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
