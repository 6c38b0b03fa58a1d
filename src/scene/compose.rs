use crate::content::{ContentFields, ContentModel, is_present};
use crate::foundation::core::Canvas;
use crate::layout::LayoutArchetype;
use crate::layout::frame::{self, BODY, CANVAS_RADIUS};
use crate::scene::{Fill, Paint, Region, ResolvedScene, Role};
use crate::theme::Theme;

/// Content fields after the presence predicate has been applied.
///
/// The headline is the one mandatory text region and is kept even when empty; every other field
/// is `None` unless its trimmed value is non-empty. Present values are passed through verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentFields<'a> {
    pub headline: &'a str,
    pub subheadline: Option<&'a str>,
    pub price: Option<&'a str>,
    pub badge: Option<&'a str>,
    pub cta: Option<&'a str>,
}

impl<'a> PresentFields<'a> {
    pub fn from_content(c: &'a ContentFields) -> Self {
        let keep = |s: &'a String| is_present(s).then_some(s.as_str());
        Self {
            headline: &c.headline,
            subheadline: keep(&c.subheadline),
            price: keep(&c.price),
            badge: keep(&c.badge),
            cta: keep(&c.cta),
        }
    }
}

/// Compose `content` into a fully resolved scene using `theme` and `layout`.
///
/// Pure and total: the same inputs always produce an identical scene, and no combination of
/// empty fields or missing image fails.
pub fn resolve(theme: &Theme, layout: &LayoutArchetype, content: &ContentModel) -> ResolvedScene {
    let canvas = Canvas::FORMAT;
    let tokens = &theme.tokens;
    let fields = PresentFields::from_content(&content.fields);

    let background = Region::fill(
        Role::Background,
        canvas.rect(),
        Fill {
            paint: Paint::DiagonalGradient(tokens.background),
            backdrop_blur_px: 0,
            border: None,
        },
    );
    let overlay = Region::fill(Role::DimOverlay, canvas.rect(), Fill::solid(tokens.overlay));

    let root = Region::group(Role::Root, canvas.rect())
        .rounded(CANVAS_RADIUS)
        .clipped()
        .with_children(vec![
            background,
            overlay,
            frame::header(tokens, fields.badge),
            layout.compose(tokens, &fields, content.image(), BODY),
            frame::footer(tokens),
        ]);

    let scene = ResolvedScene {
        canvas,
        theme: theme.id.clone(),
        layout: layout.id,
        root,
    };
    tracing::debug!(
        theme = %theme.id,
        layout = %layout.id,
        regions = scene.regions().count(),
        has_image = content.image().is_some(),
        "resolved scene"
    );
    scene
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
