//! Social Studio composes single-image social media posts.
//!
//! A post is a theme, a layout archetype and a handful of text fields plus one optional picture.
//! The crate turns those into a fully resolved scene, renders it on the CPU and exports it as a
//! fixed-size PNG next to a ready-to-paste caption:
//!
//! - Pick a [`Theme`] and a [`LayoutId`]
//! - Edit [`ContentFields`] and adopt a picture through an [`EditorSession`]
//! - Preview with [`EditorSession::render_preview`], export with [`EditorSession::export_to`]
#![forbid(unsafe_code)]

mod foundation;

/// Caption text assembled from the content fields.
pub mod caption;
/// Clipboard adapters for the caption copy action.
pub mod clipboard;
pub mod config;
/// Editable content and the picked image.
pub mod content;
/// Fixed-resolution PNG export.
pub mod export;
pub mod layout;
pub mod logging;
pub mod render;
pub mod scene;
/// Session-oriented editing API.
pub mod session;
pub mod theme;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{
    Affine, Canvas, EXPORT_FILE_NAME, EXPORT_PIXEL_RATIO, FORMAT_SIZE, MAX_SURFACE_PX, Point,
    RasterTarget, Rect, Size, Vec2,
};
pub use crate::foundation::error::{StudioError, StudioResult};

pub use crate::caption::{Caption, assemble};
#[cfg(feature = "clipboard")]
pub use crate::clipboard::SystemClipboard;
pub use crate::clipboard::{COPY_CONFIRMATION, ClipboardSink, CopyIndicator, MemoryClipboard};
pub use crate::config::{ExportConfig, FontConfig, LoggingConfig, StudioConfig};
pub use crate::content::{
    ContentFields, ContentModel, FilePicker, ImagePicker, ImageRef, ImageSlot, PickedImage,
    TextField, is_present,
};
pub use crate::export::{
    AssetSink, DownloadDir, ExportEngine, ExportedAsset, ImageSnapshot, InMemorySink,
};
pub use crate::layout::{LayoutArchetype, LayoutId, get_layout, list_layouts};
pub use crate::render::{
    CpuRenderer, ImageSource, LoadedFont, MissingFontPolicy, RenderedImage, load_font,
};
pub use crate::scene::{Region, RegionKind, ResolvedScene, Role, resolve};
pub use crate::session::EditorSession;
pub use crate::theme::{StyleTokens, Theme, ThemeRegistry, get_theme, list_themes};
