use crate::content::ImageRef;
use crate::foundation::core::Rect;
use crate::layout::frame::{self, Align, PANE_RADIUS, Pill, TextStyle};
use crate::scene::{Fill, PresentFields, Region, Role, TextAlign};
use crate::theme::StyleTokens;

const PANEL_PAD: f64 = 48.0;
const GAP: f64 = 24.0;
const CHIP_HEIGHT: f64 = 72.0;
const CHIP_GAP: f64 = 32.0;
const SUB_MAX_WIDTH: f64 = 640.0;

/// Full-bleed image with a centered text panel floating over it.
pub(super) fn compose(
    tokens: &StyleTokens,
    fields: &PresentFields<'_>,
    image: Option<ImageRef>,
    body: Rect,
) -> Region {
    let ink = tokens.focus_panel.text.unwrap_or(tokens.text);
    let headline = TextStyle::new(72.0, ink, 2).align(TextAlign::Center);
    let sub = TextStyle::new(32.0, tokens.muted_text, 2).align(TextAlign::Center);

    let panel_h = 2.0 * PANEL_PAD
        + headline.slot_height()
        + GAP
        + sub.slot_height()
        + GAP
        + CHIP_HEIGHT;
    let panel_y = body.y0 + frame::align_offset(body.height(), panel_h, Align::Center);
    let panel = Rect::new(body.x0, panel_y, body.x1, panel_y + panel_h);

    let mut children = Vec::with_capacity(3);
    match image {
        Some(img) => {
            children.push(Region::image(Role::Image, body, img).with_opacity(0.7));
            children.push(Region::fill(
                Role::ImageOverlay,
                body,
                Fill::solid(tokens.overlay).with_blur(4),
            ));
        }
        None => {
            let above = Rect::new(body.x0, body.y0, body.x1, panel.y0);
            children.push(frame::placeholder(tokens, body, above, None));
        }
    }
    children.push(text_panel(tokens, fields, panel, &headline, &sub));

    Region::group(Role::Body, body)
        .rounded(PANE_RADIUS)
        .clipped()
        .with_children(children)
}

fn text_panel(
    tokens: &StyleTokens,
    fields: &PresentFields<'_>,
    panel: Rect,
    headline: &TextStyle,
    sub: &TextStyle,
) -> Region {
    let inner = frame::shrink(panel, PANEL_PAD);
    let rows = frame::stack_down(
        inner.x0,
        inner.x1,
        inner.y0,
        &[headline.slot_height(), sub.slot_height(), CHIP_HEIGHT],
        GAP,
    );
    let mut children = vec![frame::text(Role::Headline, rows[0], fields.headline, headline)];

    if let Some(s) = fields.subheadline {
        let w = rows[1].width().min(SUB_MAX_WIDTH);
        let x0 = rows[1].x0 + frame::align_offset(rows[1].width(), w, Align::Center);
        let r = Rect::new(x0, rows[1].y0, x0 + w, rows[1].y1);
        children.push(frame::text(Role::Subheadline, r, s, sub));
    }

    let chip = |role, label_role, text| Pill {
        role,
        label_role,
        text,
        fill: tokens.accent,
        ink: tokens.accent_ink,
        size_px: 28.0,
        tracking: 0.0,
        height: CHIP_HEIGHT,
        pad_x: 40.0,
    };
    let chips: Vec<Pill<'_>> = [
        fields.price.map(|p| chip(Role::Price, Role::PriceLabel, p)),
        fields.cta.map(|c| chip(Role::Cta, Role::CtaLabel, c)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !chips.is_empty() {
        let row = rows[2];
        let n = chips.len() as f64;
        let slot_max = (row.width() - CHIP_GAP * (n - 1.0)) / n;
        let widths: Vec<f64> = chips.iter().map(|c| c.width(slot_max)).collect();
        let total = widths.iter().sum::<f64>() + CHIP_GAP * (n - 1.0);
        let mut x = row.x0 + frame::align_offset(row.width(), total, Align::Center);
        for (c, w) in chips.iter().zip(widths) {
            children.push(c.build(x, row.y0, w));
            x += w + CHIP_GAP;
        }
    }

    Region::fill(
        Role::FocusPanel,
        panel,
        Fill::solid(tokens.focus_panel.fill).with_blur(tokens.focus_panel.blur_px),
    )
    .rounded(PANE_RADIUS)
    .with_children(children)
}
