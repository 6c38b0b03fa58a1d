use crate::content::ImageRef;
use crate::foundation::core::Rect;
use crate::layout::frame::{self, PANE_RADIUS, TextStyle};
use crate::scene::{Fill, PresentFields, Region, Role};
use crate::theme::StyleTokens;

const PANE_PAD: f64 = 40.0;

/// Large headline pane on the left, secondary image on the right (0.8fr / 1.2fr).
pub(super) fn compose(
    tokens: &StyleTokens,
    fields: &PresentFields<'_>,
    image: Option<ImageRef>,
    body: Rect,
) -> Region {
    let (text_rect, image_rect) = frame::columns(body, 0.8, 1.2, 40.0);
    Region::group(Role::Body, body).with_children(vec![
        text_pane(tokens, fields, text_rect),
        image_pane(tokens, image, image_rect),
    ])
}

fn text_pane(tokens: &StyleTokens, fields: &PresentFields<'_>, rect: Rect) -> Region {
    let inner = frame::shrink(rect, PANE_PAD);
    let headline = TextStyle::new(72.0, tokens.text, 4);
    let mut children = vec![frame::text(
        Role::Headline,
        Rect::new(inner.x0, inner.y0, inner.x1, inner.y0 + headline.slot_height()),
        fields.headline,
        &headline,
    )];

    let sub = TextStyle::new(28.0, tokens.muted_text, 3);
    let price = TextStyle::new(40.0, tokens.muted_text, 1);
    let cta = TextStyle::new(24.0, tokens.accent, 1);
    let items: Vec<(Role, &str, &TextStyle)> = [
        fields.subheadline.map(|s| (Role::Subheadline, s, &sub)),
        fields.price.map(|p| (Role::Price, p, &price)),
        fields.cta.map(|c| (Role::Cta, c, &cta)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let heights: Vec<f64> = items.iter().map(|(_, _, s)| s.slot_height()).collect();
    let rects = frame::stack_up(inner.x0, inner.x1, inner.y1, &heights, 24.0);
    for ((role, value, style), r) in items.into_iter().zip(rects) {
        children.push(frame::text(role, r, value, style));
    }

    Region::fill(
        Role::TextPane,
        rect,
        Fill::solid(tokens.surface.fill).with_blur(tokens.surface.blur_px),
    )
    .rounded(PANE_RADIUS)
    .with_children(children)
}

fn image_pane(tokens: &StyleTokens, image: Option<ImageRef>, rect: Rect) -> Region {
    let content = match image {
        Some(img) => Region::image(Role::Image, rect, img),
        None => frame::placeholder(tokens, rect, rect, Some("Votre visuel s’affichera ici")),
    };
    Region::fill(
        Role::ImagePane,
        rect,
        Fill::solid(tokens.image_dim).with_border(tokens.surface.fill, 2.0),
    )
    .rounded(PANE_RADIUS)
    .clipped()
    .with_children(vec![content])
}
