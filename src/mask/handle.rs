use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use crate::{
    config::model::ImageMaskOptions,
    foundation::error::GridResult,
    mask::raster::{MaskRaster, load_image_mask},
};

#[derive(Debug)]
enum MaskLoad {
    Ready(Arc<MaskRaster>),
    Failed(String),
}

/// Load state of a [`MaskHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskStatus {
    /// Raster not yet available; samples read as zero.
    Pending,
    /// Raster available.
    Ready,
    /// Load failed; the mask never contributes.
    Failed,
}

/// Shared, write-once reference to a mask raster that may arrive asynchronously.
///
/// Reads never block: a tick observes either the finished raster or nothing.
#[derive(Clone, Debug)]
pub struct MaskHandle {
    slot: Arc<OnceLock<MaskLoad>>,
}

impl MaskHandle {
    /// Handle that is ready immediately.
    pub fn ready(raster: MaskRaster) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(MaskLoad::Ready(Arc::new(raster)));
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Pending handle plus the loader that completes it.
    pub fn pending() -> (Self, MaskLoader) {
        let slot = Arc::new(OnceLock::new());
        (
            Self { slot: slot.clone() },
            MaskLoader { slot: Some(slot) },
        )
    }

    /// Current load state.
    pub fn status(&self) -> MaskStatus {
        match self.slot.get() {
            None => MaskStatus::Pending,
            Some(MaskLoad::Ready(_)) => MaskStatus::Ready,
            Some(MaskLoad::Failed(_)) => MaskStatus::Failed,
        }
    }

    /// Block until the loader finishes. Not for use inside a tick.
    pub fn wait(&self) -> MaskStatus {
        match self.slot.wait() {
            MaskLoad::Ready(_) => MaskStatus::Ready,
            MaskLoad::Failed(_) => MaskStatus::Failed,
        }
    }

    /// Raster if ready.
    pub fn raster(&self) -> Option<&MaskRaster> {
        match self.slot.get() {
            Some(MaskLoad::Ready(r)) => Some(r.as_ref()),
            _ => None,
        }
    }

    /// Failure reason if the load failed.
    pub fn failure(&self) -> Option<&str> {
        match self.slot.get() {
            Some(MaskLoad::Failed(reason)) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Raster width/height, `(0, 0)` unless ready.
    pub fn dimensions(&self) -> (u32, u32) {
        self.raster()
            .map(|r| (r.width(), r.height()))
            .unwrap_or((0, 0))
    }
}

/// Completes a pending [`MaskHandle`]. Dropping it unfinished marks the mask failed.
#[derive(Debug)]
pub struct MaskLoader {
    slot: Option<Arc<OnceLock<MaskLoad>>>,
}

impl MaskLoader {
    /// Publish the raster. Returns `false` if the handle was already completed.
    pub fn fulfill(mut self, raster: MaskRaster) -> bool {
        self.finish(MaskLoad::Ready(Arc::new(raster)))
    }

    /// Mark the load as failed. Returns `false` if the handle was already completed.
    pub fn fail(mut self, reason: impl Into<String>) -> bool {
        self.finish(MaskLoad::Failed(reason.into()))
    }

    /// Fulfill or fail from a generation result.
    pub fn complete(self, result: GridResult<MaskRaster>) -> bool {
        match result {
            Ok(raster) => self.fulfill(raster),
            Err(err) => {
                tracing::warn!(error = %err, "mask load failed");
                self.fail(err.to_string())
            }
        }
    }

    fn finish(&mut self, load: MaskLoad) -> bool {
        match self.slot.take() {
            // When every handle is gone this just drops the raster.
            Some(slot) => slot.set(load).is_ok(),
            None => false,
        }
    }
}

impl Drop for MaskLoader {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            let _ = slot.set(MaskLoad::Failed("mask loader dropped".to_owned()));
        }
    }
}

/// Decode an image mask on a background thread; the handle stays pending until it lands.
pub fn spawn_image_mask_load(path: PathBuf, opts: ImageMaskOptions) -> MaskHandle {
    let (handle, loader) = MaskHandle::pending();
    std::thread::spawn(move || {
        let result = load_image_mask(&path, &opts);
        loader.complete(result);
    });
    handle
}

#[cfg(test)]
#[path = "../../tests/unit/mask/handle.rs"]
mod tests;
