use std::{
    io::Cursor,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::{
    foundation::error::{MemeError, MemeResult},
    render::surface::Surface,
};

/// An encoded frame ready to be handed to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    /// Suggested download name, `meme-<unix-epoch-milliseconds>.png`.
    pub file_name: String,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

impl Export {
    /// Write into `dir` (created if missing) under [`Export::file_name`].
    ///
    /// The file is written in one go; a failed write leaves no file behind.
    pub fn write_to_dir(&self, dir: &Path) -> MemeResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        if let Err(e) = std::fs::write(&path, &self.bytes) {
            let _ = std::fs::remove_file(&path);
            return Err(anyhow::Error::new(e)
                .context(format!("write png '{}'", path.display()))
                .into());
        }
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "export written");
        Ok(path)
    }
}

/// `meme-<millis>.png`.
pub fn export_file_name(unix_millis: u128) -> String {
    format!("meme-{unix_millis}.png")
}

/// Milliseconds since the Unix epoch (0 if the clock is before it).
pub fn unix_millis_now() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Encode the surface as a straight-alpha RGBA8 PNG.
pub fn encode_png(surface: &Surface) -> MemeResult<Vec<u8>> {
    if surface.is_empty() {
        return Err(MemeError::export("surface is empty"));
    }
    let img = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.to_straight_rgba8(),
    )
    .ok_or_else(|| MemeError::export("surface buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| MemeError::export(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Encode the surface and name it after `unix_millis`.
pub fn export_surface(surface: &Surface, unix_millis: u128) -> MemeResult<Export> {
    Ok(Export {
        file_name: export_file_name(unix_millis),
        bytes: encode_png(surface)?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
