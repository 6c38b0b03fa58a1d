//! Fully resolved scene description: a tree of positioned regions with concrete colors, literal
//! text and image handles. Scenes are pure data; [`crate::render`] turns them into pixels.

mod compose;

use serde::Serialize;

use crate::content::ImageRef;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Rect};
use crate::foundation::math::Fnv1a64;
use crate::layout::LayoutId;
use crate::theme::Gradient3;

pub use compose::{PresentFields, resolve};

/// What a region stands for. Used for lookup and inspection, never for drawing decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Root,
    Background,
    DimOverlay,
    Header,
    Badge,
    BadgeIcon,
    BadgeLabel,
    HeaderSpacer,
    ChannelLabel,
    Body,
    ImagePane,
    ImageDim,
    Image,
    ImageOverlay,
    Placeholder,
    PlaceholderIcon,
    PlaceholderHint,
    TextPane,
    FocusPanel,
    Headline,
    Subheadline,
    Price,
    PriceLabel,
    Cta,
    CtaLabel,
    Footer,
    FooterBrand,
    FooterFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Paint {
    Solid(Rgba8),
    /// Three-stop gradient along the top-left to bottom-right diagonal of the region.
    DiagonalGradient(Gradient3),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Border {
    pub color: Rgba8,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fill {
    pub paint: Paint,
    /// Blur radius applied to everything already drawn beneath the region, in logical pixels.
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub backdrop_blur_px: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
}

impl Fill {
    pub fn solid(color: Rgba8) -> Self {
        Self {
            paint: Paint::Solid(color),
            backdrop_blur_px: 0,
            border: None,
        }
    }

    pub fn with_blur(mut self, px: u32) -> Self {
        self.backdrop_blur_px = px;
        self
    }

    pub fn with_border(mut self, color: Rgba8, width: f64) -> Self {
        self.border = Some(Border { color, width });
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A text run wrapped to its region width and clipped to `max_lines`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextSpec {
    pub text: String,
    pub size_px: f32,
    pub color: Rgba8,
    pub align: TextAlign,
    pub v_align: VAlign,
    /// Extra advance after every character, in logical pixels.
    pub letter_spacing: f32,
    /// Line box height as a multiple of `size_px`.
    pub line_height: f32,
    pub max_lines: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Scale to cover the region, cropping the overflow.
    Cover,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageFill {
    pub image: ImageRef,
    pub fit: ImageFit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconGlyph {
    Image,
    Sparkles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IconSpec {
    pub glyph: IconGlyph,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionKind {
    Group,
    Fill(Fill),
    Text(TextSpec),
    Image(ImageFill),
    Icon(IconSpec),
}

/// One node of the scene tree. `rect` is absolute, in logical canvas pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Region {
    pub role: Role,
    pub rect: Rect,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub corner_radius: f64,
    /// Children are clipped to this region's rounded rect.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clip: bool,
    pub opacity: f32,
    #[serde(flatten)]
    pub kind: RegionKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Region>,
}

impl Region {
    pub fn new(role: Role, rect: Rect, kind: RegionKind) -> Self {
        Self {
            role,
            rect,
            corner_radius: 0.0,
            clip: false,
            opacity: 1.0,
            kind,
            children: Vec::new(),
        }
    }

    pub fn group(role: Role, rect: Rect) -> Self {
        Self::new(role, rect, RegionKind::Group)
    }

    pub fn fill(role: Role, rect: Rect, fill: Fill) -> Self {
        Self::new(role, rect, RegionKind::Fill(fill))
    }

    pub fn text(role: Role, rect: Rect, spec: TextSpec) -> Self {
        Self::new(role, rect, RegionKind::Text(spec))
    }

    pub fn image(role: Role, rect: Rect, image: ImageRef) -> Self {
        Self::new(
            role,
            rect,
            RegionKind::Image(ImageFill {
                image,
                fit: ImageFit::Cover,
            }),
        )
    }

    pub fn icon(role: Role, rect: Rect, glyph: IconGlyph, color: Rgba8) -> Self {
        Self::new(role, rect, RegionKind::Icon(IconSpec { glyph, color }))
    }

    pub fn rounded(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn clipped(mut self) -> Self {
        self.clip = true;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_children(mut self, children: Vec<Region>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: Region) {
        self.children.push(child);
    }

    /// Pre-order traversal of this region and its descendants.
    pub fn iter(&self) -> RegionIter<'_> {
        RegionIter { stack: vec![self] }
    }
}

pub struct RegionIter<'a> {
    stack: Vec<&'a Region>,
}

impl<'a> Iterator for RegionIter<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        let r = self.stack.pop()?;
        self.stack.extend(r.children.iter().rev());
        Some(r)
    }
}

/// The composed post, ready to render at any size.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedScene {
    pub canvas: Canvas,
    pub theme: String,
    pub layout: LayoutId,
    pub root: Region,
}

impl ResolvedScene {
    pub fn regions(&self) -> RegionIter<'_> {
        self.root.iter()
    }

    /// First region with `role`, in pre-order.
    pub fn find(&self, role: Role) -> Option<&Region> {
        self.regions().find(|r| r.role == role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.find(role).is_some()
    }

    /// Image handles referenced by the scene, in draw order.
    pub fn image_refs(&self) -> Vec<ImageRef> {
        self.regions()
            .filter_map(|r| match &r.kind {
                RegionKind::Image(i) => Some(i.image),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// FNV-1a over the canonical JSON encoding. Equal scenes share a fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        match serde_json::to_vec(self) {
            Ok(bytes) => h.write_bytes(&bytes),
            Err(e) => {
                tracing::warn!(error = %e, "scene is not serializable; fingerprinting debug form");
                h.write_bytes(format!("{self:?}").as_bytes());
            }
        }
        h.finish()
    }
}

fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
