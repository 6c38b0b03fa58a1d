//! The editor session: the one owner of the editing state.
//!
//! Every mutation goes through a method here and re-resolves the scene before returning, so the
//! preview, the caption and any export always see the latest committed edit.

use std::sync::Arc;
use std::time::Instant;

use crate::caption::{Caption, assemble};
use crate::clipboard::{ClipboardSink, CopyIndicator};
use crate::config::StudioConfig;
use crate::content::{ContentFields, ContentModel, ImagePicker, ImageRef, PickedImage, TextField};
use crate::export::{AssetSink, ExportEngine, ExportedAsset};
use crate::foundation::core::{FORMAT_SIZE, RasterTarget};
use crate::foundation::error::StudioResult;
use crate::layout::{LayoutArchetype, LayoutId, get_layout, layout};
use crate::render::{CpuRenderer, LoadedFont, MissingFontPolicy, RenderedImage, load_font};
use crate::scene::{ResolvedScene, resolve};
use crate::theme::{Theme, ThemeRegistry};

pub struct EditorSession {
    themes: ThemeRegistry,
    theme: Theme,
    layout: &'static LayoutArchetype,
    content: ContentModel,
    scene: ResolvedScene,
    preview: CpuRenderer,
    display: RasterTarget,
    exporter: ExportEngine,
    copied: CopyIndicator,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("theme", &self.theme.id)
            .field("layout", &self.layout.id)
            .field("image", &self.content.image())
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    /// Start on the registry's first theme, the `split` layout and the example content.
    pub fn new(
        themes: ThemeRegistry,
        font: Option<Arc<LoadedFont>>,
        missing_font: MissingFontPolicy,
    ) -> Self {
        let theme = themes.default_theme().clone();
        let layout = layout(LayoutId::Split);
        let content = ContentModel::default();
        let scene = resolve(&theme, layout, &content);
        Self {
            themes,
            theme,
            layout,
            content,
            scene,
            preview: CpuRenderer::new(font.clone(), missing_font),
            display: RasterTarget {
                width: FORMAT_SIZE,
                height: FORMAT_SIZE,
            },
            exporter: ExportEngine::new(font, missing_font),
            copied: CopyIndicator::default(),
        }
    }

    /// Build the theme registry and resolve the font as configured.
    pub fn from_config(cfg: &StudioConfig) -> StudioResult<Self> {
        let themes = match &cfg.themes_file {
            Some(path) => ThemeRegistry::with_extra_file(path)?,
            None => ThemeRegistry::builtin(),
        };
        let font = load_font(&cfg.fonts)?;
        Ok(Self::new(themes, font, cfg.fonts.missing_font))
    }

    pub fn themes(&self) -> &[Theme] {
        self.themes.list()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn layout(&self) -> &'static LayoutArchetype {
        self.layout
    }

    pub fn fields(&self) -> &ContentFields {
        &self.content.fields
    }

    pub fn image(&self) -> Option<ImageRef> {
        self.content.image()
    }

    pub fn live_images(&self) -> usize {
        self.content.images().live_count()
    }

    pub fn scene(&self) -> &ResolvedScene {
        &self.scene
    }

    /// Switch theme. An unknown id leaves the session untouched.
    pub fn select_theme(&mut self, id: &str) -> StudioResult<()> {
        let theme = self.themes.get(id)?.clone();
        self.theme = theme;
        self.refresh();
        Ok(())
    }

    /// Switch layout. An unknown id leaves the session untouched.
    pub fn select_layout(&mut self, id: &str) -> StudioResult<()> {
        self.layout = get_layout(id)?;
        self.refresh();
        Ok(())
    }

    pub fn set_field(&mut self, field: TextField, value: impl Into<String>) {
        self.content.fields.set(field, value);
        self.refresh();
    }

    pub fn set_fields(&mut self, fields: ContentFields) {
        self.content.fields = fields;
        self.refresh();
    }

    /// Adopt a picked image, releasing the previous one.
    pub fn adopt_image(&mut self, picked: PickedImage) -> ImageRef {
        let r = self.content.adopt_image(picked);
        self.refresh();
        r
    }

    /// Ask `picker` for an image. A cancelled pick keeps the current one.
    pub fn pick_image(&mut self, picker: &mut dyn ImagePicker) -> StudioResult<Option<ImageRef>> {
        match picker.pick()? {
            Some(picked) => Ok(Some(self.adopt_image(picked))),
            None => {
                tracing::debug!("image pick cancelled");
                Ok(None)
            }
        }
    }

    /// Drop the live image and go back to the placeholder.
    pub fn reset_image(&mut self) -> bool {
        let released = self.content.clear_image();
        if released {
            self.refresh();
        }
        released
    }

    /// Record the size the preview is currently displayed at. Exports ignore it.
    pub fn set_display_size(&mut self, width: u32, height: u32) -> StudioResult<()> {
        self.display = RasterTarget::viewport(width, height)?;
        Ok(())
    }

    pub fn display_size(&self) -> RasterTarget {
        self.display
    }

    /// Render the scene at the display size.
    pub fn render_preview(&mut self) -> StudioResult<RenderedImage> {
        self.preview
            .render(&self.scene, self.content.images(), self.display)
    }

    pub fn caption(&self) -> Caption {
        assemble(&self.content.fields)
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.is_busy()
    }

    /// Capture the current scene at the fixed export resolution.
    pub async fn export(&self) -> StudioResult<ExportedAsset> {
        self.exporter
            .export(&self.scene, self.content.images())
            .await
    }

    /// Capture the current scene and save it through `sink`.
    pub async fn export_to<K: AssetSink + ?Sized>(&self, sink: &K) -> StudioResult<ExportedAsset> {
        self.exporter
            .export_to(&self.scene, self.content.images(), sink)
            .await
    }

    /// Copy the caption. Only a successful write shows the confirmation.
    pub fn copy_caption(&mut self, clipboard: &mut dyn ClipboardSink) -> StudioResult<()> {
        self.copy_caption_at(clipboard, Instant::now())
    }

    pub fn copy_caption_at(
        &mut self,
        clipboard: &mut dyn ClipboardSink,
        now: Instant,
    ) -> StudioResult<()> {
        let caption = self.caption();
        match clipboard.write_text(caption.as_str()) {
            Ok(()) => {
                self.copied.show(now);
                tracing::info!(chars = caption.as_str().chars().count(), "caption copied");
                Ok(())
            }
            Err(e) => {
                self.copied.clear();
                tracing::warn!(error = %e, "caption copy failed");
                Err(e)
            }
        }
    }

    pub fn caption_copied(&self) -> bool {
        self.copied.is_shown()
    }

    pub fn caption_copied_at(&self, now: Instant) -> bool {
        self.copied.is_shown_at(now)
    }

    fn refresh(&mut self) {
        self.scene = resolve(&self.theme, self.layout, &self.content);
        tracing::debug!(
            theme = %self.theme.id,
            layout = %self.layout.id,
            fingerprint = self.scene.fingerprint(),
            "scene refreshed"
        );
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
