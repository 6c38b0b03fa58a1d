//! Named visual themes and the style tokens every layout draws with.

mod registry;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;

pub use registry::{MAX_BLUR_PX, ThemeRegistry, builtin_themes, get_theme, list_themes};

/// A selectable visual theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub tokens: StyleTokens,
}

/// The closed set of colors and surface treatments a layout may use.
///
/// Layout archetypes never carry colors of their own: every fill, text run and icon in a resolved
/// scene is taken from one of these tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleTokens {
    /// Canvas background, a diagonal gradient from the top-left to the bottom-right corner.
    pub background: Gradient3,
    /// Primary text tone.
    pub text: Rgba8,
    pub badge: BadgeTone,
    /// Flat overlay dimming the whole canvas above the background.
    pub overlay: Rgba8,
    pub muted_text: Rgba8,
    /// Translucent panel behind text panes and placeholders.
    pub surface: SurfaceTone,
    /// Tint drawn behind the product image.
    pub image_dim: Rgba8,
    /// Panel floating over the full-bleed image of the focus layout.
    pub focus_panel: SurfaceTone,
    pub accent: Rgba8,
    /// Text drawn on accent-filled pills.
    #[serde(default = "default_accent_ink")]
    pub accent_ink: Rgba8,
}

/// Slate-900, the ink every built-in theme puts on its accent pills.
pub const DEFAULT_ACCENT_INK: Rgba8 = Rgba8::rgb(0x0f, 0x17, 0x2a);

fn default_accent_ink() -> Rgba8 {
    DEFAULT_ACCENT_INK
}

/// Three-stop gradient (`from` at 0, `via` at 0.5, `to` at 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient3 {
    pub from: Rgba8,
    pub via: Rgba8,
    pub to: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeTone {
    pub fill: Rgba8,
    pub text: Rgba8,
}

/// Translucent fill with an optional backdrop blur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceTone {
    pub fill: Rgba8,
    /// Backdrop blur radius in logical pixels, `0` disables the blur.
    #[serde(default)]
    pub blur_px: u32,
    /// Text tone override for content placed on this surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Rgba8>,
}

impl SurfaceTone {
    pub const fn new(fill: Rgba8, blur_px: u32) -> Self {
        Self {
            fill,
            blur_px,
            text: None,
        }
    }

    pub const fn with_text(mut self, text: Rgba8) -> Self {
        self.text = Some(text);
        self
    }
}
