use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{StudioError, StudioResult};
use crate::theme::{BadgeTone, DEFAULT_ACCENT_INK, Gradient3, StyleTokens, SurfaceTone, Theme};

/// Immutable, ordered set of themes.
///
/// Built once (from the built-in set, optionally extended from a theme file) and never mutated
/// afterwards. Lookup is by id.
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

/// Largest backdrop blur a theme may ask for, in logical pixels.
pub const MAX_BLUR_PX: u32 = 256;

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    pub fn builtin() -> Self {
        Self {
            themes: builtin_themes(),
        }
    }

    /// Build a registry from an explicit list, rejecting empty or duplicate ids and blur radii
    /// above [`MAX_BLUR_PX`].
    pub fn from_themes(themes: Vec<Theme>) -> StudioResult<Self> {
        if themes.is_empty() {
            return Err(StudioError::validation("theme registry must not be empty"));
        }
        let mut seen = BTreeSet::new();
        for t in &themes {
            if t.id.trim().is_empty() {
                return Err(StudioError::validation("theme id must be non-empty"));
            }
            if t.name.trim().is_empty() {
                return Err(StudioError::validation(format!(
                    "theme \"{}\" must have a display name",
                    t.id
                )));
            }
            for (what, blur) in [
                ("surface", t.tokens.surface.blur_px),
                ("focus_panel", t.tokens.focus_panel.blur_px),
            ] {
                if blur > MAX_BLUR_PX {
                    return Err(StudioError::validation(format!(
                        "theme \"{}\": {what}.blur_px {blur} exceeds {MAX_BLUR_PX}",
                        t.id
                    )));
                }
            }
            if !seen.insert(t.id.as_str()) {
                return Err(StudioError::validation(format!(
                    "duplicate theme id \"{}\"",
                    t.id
                )));
            }
        }
        Ok(Self { themes })
    }

    /// Built-in themes followed by the themes of a JSON theme file (`{"themes": [...]}`).
    pub fn with_extra_json(json: &str) -> StudioResult<Self> {
        let file: ThemeFile = serde_json::from_str(json)
            .map_err(|e| StudioError::validation(format!("invalid theme file: {e}")))?;
        let mut themes = builtin_themes();
        themes.extend(file.themes);
        Self::from_themes(themes)
    }

    pub fn with_extra_file(path: &Path) -> StudioResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            StudioError::validation(format!(
                "failed to read theme file '{}': {e}",
                path.display()
            ))
        })?;
        let reg = Self::with_extra_json(&json)?;
        tracing::info!(
            path = %path.display(),
            themes = reg.themes.len(),
            "loaded theme file"
        );
        Ok(reg)
    }

    pub fn list(&self) -> &[Theme] {
        &self.themes
    }

    pub fn get(&self, id: &str) -> StudioResult<&Theme> {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StudioError::not_found("theme", id))
    }

    /// The first registered theme, selected when a session starts.
    pub fn default_theme(&self) -> &Theme {
        &self.themes[0]
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN: LazyLock<ThemeRegistry> = LazyLock::new(ThemeRegistry::builtin);

/// Built-in themes in display order.
pub fn list_themes() -> &'static [Theme] {
    BUILTIN.list()
}

pub fn get_theme(id: &str) -> StudioResult<&'static Theme> {
    BUILTIN.get(id)
}

const fn hex(v: u32) -> Rgba8 {
    Rgba8::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

pub fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme {
            id: "sunset-glow".to_string(),
            name: "Coucher de soleil".to_string(),
            description: "Dégradé vibrant pour un effet haut de gamme".to_string(),
            tokens: StyleTokens {
                background: Gradient3 {
                    from: hex(0xF97316),
                    via: hex(0xF43F5E),
                    to: hex(0x7C3AED),
                },
                text: Rgba8::WHITE,
                badge: BadgeTone {
                    fill: Rgba8::WHITE.alpha_pct(85),
                    text: hex(0xE11D48),
                },
                overlay: Rgba8::BLACK.alpha_pct(20),
                muted_text: Rgba8::WHITE.alpha_pct(75),
                surface: SurfaceTone::new(Rgba8::WHITE.alpha_pct(10), 4),
                image_dim: Rgba8::BLACK.alpha_pct(15),
                focus_panel: SurfaceTone::new(Rgba8::BLACK.alpha_pct(35), 8),
                accent: hex(0xFDE68A),
                accent_ink: DEFAULT_ACCENT_INK,
            },
        },
        Theme {
            id: "fresh-mint".to_string(),
            name: "Menthe fraîche".to_string(),
            description: "Palette douce et minimaliste pour produits modernes".to_string(),
            tokens: StyleTokens {
                background: Gradient3 {
                    from: hex(0xA7F3D0),
                    via: Rgba8::WHITE,
                    to: hex(0xBAE6FD),
                },
                text: hex(0x0F172A),
                badge: BadgeTone {
                    fill: hex(0xD1FAE5),
                    text: hex(0x047857),
                },
                overlay: Rgba8::WHITE.alpha_pct(40),
                muted_text: hex(0x475569),
                surface: SurfaceTone::new(Rgba8::WHITE.alpha_pct(70), 8),
                image_dim: hex(0x0F172A).alpha_pct(5),
                focus_panel: SurfaceTone::new(Rgba8::WHITE.alpha_pct(80), 8)
                    .with_text(hex(0x0F172A)),
                accent: hex(0x0F766E),
                accent_ink: DEFAULT_ACCENT_INK,
            },
        },
        Theme {
            id: "noir-chic".to_string(),
            name: "Noir & Or".to_string(),
            description: "Look premium avec contraste affirmé".to_string(),
            tokens: StyleTokens {
                background: Gradient3 {
                    from: hex(0x09090B),
                    via: hex(0x18181B),
                    to: hex(0x27272A),
                },
                text: hex(0xFAFAFA),
                badge: BadgeTone {
                    fill: hex(0xFEF3C7).alpha_pct(90),
                    text: hex(0xB45309),
                },
                overlay: Rgba8::WHITE.alpha_pct(5),
                muted_text: hex(0xD4D4D8).alpha_pct(80),
                surface: SurfaceTone::new(Rgba8::WHITE.alpha_pct(5), 8),
                image_dim: hex(0x09090B).alpha_pct(20),
                focus_panel: SurfaceTone::new(Rgba8::BLACK.alpha_pct(40), 8),
                accent: hex(0xF59E0B),
                accent_ink: DEFAULT_ACCENT_INK,
            },
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;
