use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::error::{StudioError, StudioResult};

/// Opaque handle to an adopted image.
///
/// Handles are never reused within a slot, so a stale handle can never alias a newer image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct ImageRef(pub u64);

/// Encoded image bytes handed over by an [`ImagePicker`].
#[derive(Clone, Debug)]
pub struct PickedImage {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl PickedImage {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Source of user-picked images. `Ok(None)` means the user cancelled.
pub trait ImagePicker {
    fn pick(&mut self) -> StudioResult<Option<PickedImage>>;
}

/// Picks a fixed file from disk, or nothing when no path is configured.
#[derive(Clone, Debug, Default)]
pub struct FilePicker {
    pub path: Option<PathBuf>,
}

impl FilePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ImagePicker for FilePicker {
    fn pick(&mut self) -> StudioResult<Option<PickedImage>> {
        let Some(path) = self.path.as_ref() else {
            return Ok(None);
        };
        let bytes = std::fs::read(path).map_err(|e| {
            StudioError::validation(format!("failed to read image '{}': {e}", path.display()))
        })?;
        image::guess_format(&bytes).map_err(|e| {
            StudioError::validation(format!("'{}' is not a supported image: {e}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Some(PickedImage::new(name, bytes)))
    }
}

#[derive(Debug)]
struct LiveImage {
    id: ImageRef,
    name: String,
    bytes: Arc<[u8]>,
}

/// Owner of the single live image.
///
/// At most one image is live at a time: adopting a new one releases the previous one first,
/// and dropping the slot releases whatever is still live.
#[derive(Debug, Default)]
pub struct ImageSlot {
    next_id: u64,
    live: Option<LiveImage>,
}

impl ImageSlot {
    pub fn adopt(&mut self, picked: PickedImage) -> ImageRef {
        if let Some(prev) = self.current() {
            self.release(prev);
        }
        self.next_id += 1;
        let id = ImageRef(self.next_id);
        tracing::info!(
            image = id.0,
            name = %picked.name,
            bytes = picked.bytes.len(),
            "adopted image"
        );
        self.live = Some(LiveImage {
            id,
            name: picked.name,
            bytes: picked.bytes,
        });
        id
    }

    /// Release `image` if it is the live one. Stale or unknown handles are ignored.
    pub fn release(&mut self, image: ImageRef) -> bool {
        match &self.live {
            Some(l) if l.id == image => {
                tracing::info!(image = image.0, name = %l.name, "released image");
                self.live = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<ImageRef> {
        self.live.as_ref().map(|l| l.id)
    }

    pub fn live_count(&self) -> usize {
        usize::from(self.live.is_some())
    }

    pub fn name(&self, image: ImageRef) -> Option<&str> {
        self.live
            .as_ref()
            .filter(|l| l.id == image)
            .map(|l| l.name.as_str())
    }

    /// Encoded bytes of `image`, shared with the slot.
    pub fn bytes(&self, image: ImageRef) -> StudioResult<Arc<[u8]>> {
        self.live
            .as_ref()
            .filter(|l| l.id == image)
            .map(|l| Arc::clone(&l.bytes))
            .ok_or_else(|| StudioError::not_found("image", image.0.to_string()))
    }
}

impl Drop for ImageSlot {
    fn drop(&mut self) {
        if let Some(l) = self.live.take() {
            tracing::debug!(image = l.id.0, "released image on teardown");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/image.rs"]
mod tests;
