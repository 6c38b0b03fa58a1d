use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::export::ExportedAsset;
use crate::foundation::error::{StudioError, StudioResult};

/// Destination for exported assets (the "download").
pub trait AssetSink {
    fn save(&self, asset: &ExportedAsset) -> StudioResult<()>;
}

/// Saves assets into a directory under their fixed file name.
///
/// Bytes go to a hidden temp file first and are renamed into place, so a failed save never
/// leaves a truncated PNG behind.
#[derive(Clone, Debug)]
pub struct DownloadDir {
    dir: PathBuf,
}

impl DownloadDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, asset: &ExportedAsset) -> PathBuf {
        self.dir.join(&asset.file_name)
    }
}

impl AssetSink for DownloadDir {
    fn save(&self, asset: &ExportedAsset) -> StudioResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StudioError::export(format!(
                "failed to create output dir '{}': {e}",
                self.dir.display()
            ))
        })?;

        let dest = self.path_for(asset);
        let tmp = self.dir.join(format!(".{}.part", asset.file_name));
        let written = std::fs::write(&tmp, &asset.png).and_then(|()| std::fs::rename(&tmp, &dest));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(StudioError::export(format!(
                "failed to save '{}': {e}",
                dest.display()
            )));
        }
        tracing::info!(path = %dest.display(), bytes = asset.png.len(), "saved export");
        Ok(())
    }
}

/// Keeps saved assets in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    saved: Mutex<Vec<ExportedAsset>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.saved.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<ExportedAsset> {
        self.saved.lock().ok().and_then(|s| s.last().cloned())
    }
}

impl AssetSink for InMemorySink {
    fn save(&self, asset: &ExportedAsset) -> StudioResult<()> {
        self.saved
            .lock()
            .map_err(|_| StudioError::export("in-memory sink poisoned"))?
            .push(asset.clone());
        Ok(())
    }
}
