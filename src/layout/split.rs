use crate::content::ImageRef;
use crate::foundation::core::Rect;
use crate::layout::frame::{self, PANE_RADIUS, Pill, TextStyle};
use crate::scene::{Fill, PresentFields, Region, Role};
use crate::theme::StyleTokens;

const PANE_PAD: f64 = 40.0;
const CTA_TRACKING: f32 = 1.2;

/// Image pane on the left, text pane on the right (1.1fr / 0.9fr).
pub(super) fn compose(
    tokens: &StyleTokens,
    fields: &PresentFields<'_>,
    image: Option<ImageRef>,
    body: Rect,
) -> Region {
    let (image_rect, text_rect) = frame::columns(body, 1.1, 0.9, 48.0);
    Region::group(Role::Body, body).with_children(vec![
        image_pane(tokens, image, image_rect),
        text_pane(tokens, fields, text_rect),
    ])
}

fn image_pane(tokens: &StyleTokens, image: Option<ImageRef>, rect: Rect) -> Region {
    let dim = Region::fill(Role::ImageDim, rect, Fill::solid(tokens.image_dim).with_blur(1));
    let content = match image {
        Some(img) => Region::image(Role::Image, rect, img),
        None => frame::placeholder(tokens, rect, rect, Some("Ajoutez votre visuel produit")),
    };
    Region::group(Role::ImagePane, rect)
        .rounded(PANE_RADIUS)
        .clipped()
        .with_children(vec![dim, content])
}

fn text_pane(tokens: &StyleTokens, fields: &PresentFields<'_>, rect: Rect) -> Region {
    let inner = frame::shrink(rect, PANE_PAD);
    let mut children = Vec::new();

    let headline = TextStyle::new(60.0, tokens.text, 3);
    let sub = TextStyle::new(28.0, tokens.muted_text, 4);
    let mut top = frame::stack_down(
        inner.x0,
        inner.x1,
        inner.y0,
        &[headline.slot_height(), sub.slot_height()],
        32.0,
    )
    .into_iter();
    if let Some(r) = top.next() {
        children.push(frame::text(Role::Headline, r, fields.headline, &headline));
    }
    if let (Some(s), Some(r)) = (fields.subheadline, top.next()) {
        children.push(frame::text(Role::Subheadline, r, s, &sub));
    }

    let price = TextStyle::new(48.0, tokens.text, 1);
    let cta_label = fields.cta.map(str::to_uppercase);
    let cta = cta_label.as_deref().map(|label| Pill {
        role: Role::Cta,
        label_role: Role::CtaLabel,
        text: label,
        fill: tokens.accent,
        ink: tokens.accent_ink,
        size_px: 24.0,
        tracking: CTA_TRACKING,
        height: 64.0,
        pad_x: 32.0,
    });

    let mut heights = Vec::new();
    if fields.price.is_some() {
        heights.push(price.slot_height());
    }
    if let Some(p) = &cta {
        heights.push(p.height);
    }
    let mut bottom = frame::stack_up(inner.x0, inner.x1, inner.y1, &heights, 24.0).into_iter();
    if let Some(p) = fields.price {
        if let Some(r) = bottom.next() {
            children.push(frame::text(Role::Price, r, p, &price));
        }
    }
    if let (Some(pill), Some(r)) = (&cta, bottom.next()) {
        children.push(pill.build(r.x0, r.y0, pill.width(r.width())));
    }

    Region::fill(
        Role::TextPane,
        rect,
        Fill::solid(tokens.surface.fill).with_blur(tokens.surface.blur_px),
    )
    .rounded(PANE_RADIUS)
    .with_children(children)
}
