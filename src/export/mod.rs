//! Fixed-resolution PNG capture of a resolved scene.
//!
//! An export never looks at the on-screen preview size: the scene is rendered onto a fresh
//! `canvas × pixel_ratio` surface, with every referenced image re-read and re-decoded.

mod sink;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::content::ImageRef;
use crate::foundation::core::{Canvas, EXPORT_FILE_NAME, EXPORT_PIXEL_RATIO, RasterTarget};
use crate::foundation::error::{StudioError, StudioResult};
use crate::render::{CpuRenderer, ImageSource, LoadedFont, MissingFontPolicy};
use crate::scene::ResolvedScene;

pub use sink::{AssetSink, DownloadDir, InMemorySink};

/// An encoded export, ready to be handed to an [`AssetSink`].
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedAsset {
    pub file_name: String,
    pub logical: Canvas,
    pub pixel_ratio: u32,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl std::fmt::Debug for ExportedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedAsset")
            .field("file_name", &self.file_name)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

/// Owned copy of the encoded image bytes a scene references.
///
/// Taken right before capture so the blocking worker never touches the live image store.
#[derive(Clone, Debug, Default)]
pub struct ImageSnapshot {
    images: BTreeMap<ImageRef, Arc<[u8]>>,
}

impl ImageSnapshot {
    pub fn capture<S: ImageSource + ?Sized>(
        scene: &ResolvedScene,
        source: &S,
    ) -> StudioResult<Self> {
        let mut images = BTreeMap::new();
        for r in scene.image_refs() {
            if !images.contains_key(&r) {
                images.insert(r, source.fetch(r)?);
            }
        }
        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSource for ImageSnapshot {
    fn fetch(&self, image: ImageRef) -> StudioResult<Arc<[u8]>> {
        self.images.fetch(image)
    }
}

/// Holds the busy flag for the lifetime of one export.
///
/// Dropping an export future clears the flag right away. A capture already handed to the
/// blocking pool runs to completion and its result is discarded, never saved.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> StudioResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StudioError::ExportBusy)?;
        Ok(Self { flag: flag.clone() })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Non-reentrant exporter: while one export is pending, further triggers fail with
/// [`StudioError::ExportBusy`].
#[derive(Debug)]
pub struct ExportEngine {
    font: Option<Arc<LoadedFont>>,
    missing_font: MissingFontPolicy,
    pixel_ratio: u32,
    busy: Arc<AtomicBool>,
}

impl ExportEngine {
    pub fn new(font: Option<Arc<LoadedFont>>, missing_font: MissingFontPolicy) -> Self {
        Self {
            font,
            missing_font,
            pixel_ratio: EXPORT_PIXEL_RATIO,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn pixel_ratio(&self) -> u32 {
        self.pixel_ratio
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Capture `scene` at the fixed export resolution and encode it as PNG.
    #[tracing::instrument(skip_all, fields(layout = %scene.layout, theme = %scene.theme))]
    pub async fn export<S: ImageSource + ?Sized>(
        &self,
        scene: &ResolvedScene,
        images: &S,
    ) -> StudioResult<ExportedAsset> {
        let _busy = BusyGuard::acquire(&self.busy)?;
        self.capture(scene, images).await
    }

    /// [`ExportEngine::export`], then hand the asset to `sink`. The engine stays busy until the
    /// sink returns.
    #[tracing::instrument(skip_all, fields(layout = %scene.layout, theme = %scene.theme))]
    pub async fn export_to<S, K>(
        &self,
        scene: &ResolvedScene,
        images: &S,
        sink: &K,
    ) -> StudioResult<ExportedAsset>
    where
        S: ImageSource + ?Sized,
        K: AssetSink + ?Sized,
    {
        let _busy = BusyGuard::acquire(&self.busy)?;
        let asset = self.capture(scene, images).await?;
        sink.save(&asset).map_err(|e| {
            tracing::warn!(error = %e, "saving export failed");
            e.into_export_failure()
        })?;
        Ok(asset)
    }

    async fn capture<S: ImageSource + ?Sized>(
        &self,
        scene: &ResolvedScene,
        images: &S,
    ) -> StudioResult<ExportedAsset> {
        let result: StudioResult<ExportedAsset> = async {
            let snapshot = ImageSnapshot::capture(scene, images)?;
            let scene = scene.clone();
            let font = self.font.clone();
            let missing_font = self.missing_font;
            let pixel_ratio = self.pixel_ratio;
            tokio::task::spawn_blocking(move || {
                capture_blocking(&scene, &snapshot, font, missing_font, pixel_ratio)
            })
            .await
            .map_err(|e| StudioError::export(format!("capture worker failed: {e}")))?
        }
        .await;

        match result {
            Ok(asset) => {
                tracing::info!(
                    file = %asset.file_name,
                    width = asset.width,
                    height = asset.height,
                    bytes = asset.png.len(),
                    "export captured"
                );
                Ok(asset)
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                Err(e.into_export_failure())
            }
        }
    }
}

fn capture_blocking(
    scene: &ResolvedScene,
    images: &ImageSnapshot,
    font: Option<Arc<LoadedFont>>,
    missing_font: MissingFontPolicy,
    pixel_ratio: u32,
) -> StudioResult<ExportedAsset> {
    let target = RasterTarget::capture(scene.canvas, pixel_ratio)?;
    let mut renderer = CpuRenderer::new(font, missing_font);
    let image = renderer.render(scene, images, target)?;
    let png = image.encode_png()?;
    Ok(ExportedAsset {
        file_name: EXPORT_FILE_NAME.to_string(),
        logical: scene.canvas,
        pixel_ratio,
        width: image.width,
        height: image.height,
        png,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/mod.rs"]
mod tests;
