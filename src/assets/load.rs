use std::sync::mpsc;

use crate::{
    assets::decode::{SourceImage, decode_image},
    foundation::error::{MemeError, MemeResult},
};

/// One-shot background image decode.
///
/// The decode runs on the `rayon` global pool and resolves exactly once, either to a
/// [`SourceImage`] or to a [`MemeError::Decode`]. There is no cancellation; a load that is no
/// longer wanted is simply dropped, and when several loads are applied to a session the last one
/// applied wins.
pub struct ImageLoad {
    rx: Option<mpsc::Receiver<MemeResult<SourceImage>>>,
}

impl ImageLoad {
    /// Start decoding `bytes` in the background.
    pub fn spawn(bytes: Vec<u8>) -> Self {
        let (tx, rx) = mpsc::sync_channel::<MemeResult<SourceImage>>(1);
        rayon::spawn(move || {
            let out = decode_image(&bytes);
            if let Err(e) = &out {
                tracing::debug!(error = %e, "background image decode failed");
            }
            // Receiver may already be gone; nobody is waiting then.
            let _ = tx.send(out);
        });
        Self { rx: Some(rx) }
    }

    /// Block until the decode resolves.
    pub fn wait(mut self) -> MemeResult<SourceImage> {
        let rx = self
            .rx
            .take()
            .ok_or_else(|| MemeError::decode("image load already resolved"))?;
        rx.recv()
            .map_err(|_| MemeError::decode("image decode worker exited without a result"))?
    }

    /// Non-blocking poll. Returns `Some` exactly once, when the decode has resolved.
    pub fn try_take(&mut self) -> Option<MemeResult<SourceImage>> {
        let rx = self.rx.as_ref()?;
        let out = match rx.try_recv() {
            Ok(res) => res,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => Err(MemeError::decode(
                "image decode worker exited without a result",
            )),
        };
        self.rx = None;
        Some(out)
    }

    /// Whether the load has already handed out its result.
    pub fn is_resolved(&self) -> bool {
        self.rx.is_none()
    }
}

impl std::fmt::Debug for ImageLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoad")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/load.rs"]
mod tests;
