//! Canvas frame geometry and the building blocks shared by every archetype.
//!
//! All geometry is derived from fixed slots and never from measured text, so a long headline
//! can wrap or be cut but never moves another region.

use crate::foundation::color::Rgba8;
use crate::foundation::core::{FORMAT_SIZE, Rect};
use crate::scene::{Fill, IconGlyph, Region, Role, TextAlign, TextSpec, VAlign};
use crate::theme::StyleTokens;

pub(crate) const CANVAS_RADIUS: f64 = 72.0;
pub(crate) const PADDING: f64 = 64.0;
pub(crate) const PANE_RADIUS: f64 = 48.0;
pub(crate) const LINE_HEIGHT: f32 = 1.25;

const EDGE: f64 = FORMAT_SIZE as f64;

pub(crate) const HEADER: Rect = Rect::new(PADDING, PADDING, EDGE - PADDING, 120.0);
pub(crate) const BODY: Rect = Rect::new(PADDING, 176.0, EDGE - PADDING, 928.0);
pub(crate) const FOOTER: Rect = Rect::new(PADDING, 984.0, EDGE - PADDING, EDGE - PADDING);

const CHROME_TEXT_PX: f32 = 22.0;
const CHANNEL_LABEL: &str = "FACEBOOK";
const CHANNEL_TRACKING: f32 = 8.8;
const BADGE_HEIGHT: f64 = 48.0;
const BADGE_ICON: f64 = 24.0;
const BADGE_TRACKING: f32 = 1.1;
const FOOTER_BRAND: &str = "© Votre marque";
const FOOTER_FORMAT: &str = "Format Facebook 1:1";

pub(crate) fn shrink(r: Rect, pad: f64) -> Rect {
    let w = (r.width() - 2.0 * pad).max(0.0);
    let h = (r.height() - 2.0 * pad).max(0.0);
    Rect::new(r.x0 + pad, r.y0 + pad, r.x0 + pad + w, r.y0 + pad + h)
}

/// Split `r` horizontally into two columns sized `a:b` (CSS `fr` units) with `gap` between them.
pub(crate) fn columns(r: Rect, a: f64, b: f64, gap: f64) -> (Rect, Rect) {
    let avail = (r.width() - gap).max(0.0);
    let wa = avail * a / (a + b);
    let left = Rect::new(r.x0, r.y0, r.x0 + wa, r.y1);
    let right = Rect::new(left.x1 + gap, r.y0, r.x1, r.y1);
    (left, right)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Align {
    Start,
    Center,
    End,
}

pub(crate) fn align_offset(container: f64, content: f64, align: Align) -> f64 {
    let rem = (container - content).max(0.0);
    match align {
        Align::Start => 0.0,
        Align::Center => rem * 0.5,
        Align::End => rem,
    }
}

/// Height of a text slot holding `lines` lines at `size_px`.
pub(crate) fn line_box(size_px: f32, lines: u32) -> f64 {
    f64::from(size_px * LINE_HEIGHT) * f64::from(lines)
}

/// Deterministic width estimate for a single line, independent of the fonts installed.
pub(crate) fn estimate_width(text: &str, size_px: f32, tracking: f32) -> f64 {
    let n = text.chars().count() as f64;
    n * (f64::from(size_px) * 0.55 + f64::from(tracking))
}

/// Lays out items of the given heights top to bottom from `top`.
pub(crate) fn stack_down(x0: f64, x1: f64, top: f64, heights: &[f64], gap: f64) -> Vec<Rect> {
    let mut y = top;
    heights
        .iter()
        .map(|&h| {
            let r = Rect::new(x0, y, x1, y + h);
            y += h + gap;
            r
        })
        .collect()
}

/// Lays out items bottom-aligned at `bottom`, keeping the input order top to bottom.
pub(crate) fn stack_up(x0: f64, x1: f64, bottom: f64, heights: &[f64], gap: f64) -> Vec<Rect> {
    let total = heights.iter().sum::<f64>() + gap * heights.len().saturating_sub(1) as f64;
    stack_down(x0, x1, bottom - total, heights, gap)
}

pub(crate) struct TextStyle {
    pub size_px: f32,
    pub color: Rgba8,
    pub align: TextAlign,
    pub v_align: VAlign,
    pub tracking: f32,
    pub max_lines: u32,
}

impl TextStyle {
    pub(crate) fn new(size_px: f32, color: Rgba8, max_lines: u32) -> Self {
        Self {
            size_px,
            color,
            align: TextAlign::Start,
            v_align: VAlign::Top,
            tracking: 0.0,
            max_lines,
        }
    }

    pub(crate) fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn v_align(mut self, v_align: VAlign) -> Self {
        self.v_align = v_align;
        self
    }

    pub(crate) fn tracking(mut self, tracking: f32) -> Self {
        self.tracking = tracking;
        self
    }

    pub(crate) fn slot_height(&self) -> f64 {
        line_box(self.size_px, self.max_lines)
    }
}

pub(crate) fn text(role: Role, rect: Rect, text: &str, style: &TextStyle) -> Region {
    Region::text(
        role,
        rect,
        TextSpec {
            text: text.to_string(),
            size_px: style.size_px,
            color: style.color,
            align: style.align,
            v_align: style.v_align,
            letter_spacing: style.tracking,
            line_height: LINE_HEIGHT,
            max_lines: style.max_lines,
        },
    )
}

/// Fully rounded pill holding one line of centered text.
pub(crate) struct Pill<'a> {
    pub role: Role,
    pub label_role: Role,
    pub text: &'a str,
    pub fill: Rgba8,
    pub ink: Rgba8,
    pub size_px: f32,
    pub tracking: f32,
    pub height: f64,
    pub pad_x: f64,
}

impl Pill<'_> {
    pub(crate) fn width(&self, max: f64) -> f64 {
        let w = estimate_width(self.text, self.size_px, self.tracking) + 2.0 * self.pad_x;
        w.max(self.height).min(max.max(0.0))
    }

    pub(crate) fn build(&self, x0: f64, y0: f64, width: f64) -> Region {
        let rect = Rect::new(x0, y0, x0 + width, y0 + self.height);
        let label_rect = Rect::new(rect.x0 + self.pad_x, rect.y0, rect.x1 - self.pad_x, rect.y1);
        let style = TextStyle::new(self.size_px, self.ink, 1)
            .align(TextAlign::Center)
            .v_align(VAlign::Center)
            .tracking(self.tracking);
        Region::fill(self.role, rect, Fill::solid(self.fill))
            .rounded(self.height * 0.5)
            .with_children(vec![text(self.label_role, label_rect, self.text, &style)])
    }
}

/// Icon and hint standing in for a missing image, filling `pane`.
///
/// The icon and the optional hint are centered inside `anchor`, which is `pane` unless part of the pane is
/// covered by other regions.
pub(crate) fn placeholder(
    tokens: &StyleTokens,
    pane: Rect,
    anchor: Rect,
    hint: Option<&str>,
) -> Region {
    const ICON: f64 = 80.0;
    const GAP: f64 = 24.0;
    let hint_style = TextStyle::new(26.0, tokens.muted_text, 2).align(TextAlign::Center);
    let hint_h = hint_style.slot_height();
    let content_h = match hint {
        Some(_) => ICON + GAP + hint_h,
        None => ICON,
    };
    let top = anchor.y0 + align_offset(anchor.height(), content_h, Align::Center);
    let icon_x = anchor.x0 + align_offset(anchor.width(), ICON, Align::Center);

    let mut children = vec![Region::icon(
        Role::PlaceholderIcon,
        Rect::new(icon_x, top, icon_x + ICON, top + ICON),
        IconGlyph::Image,
        tokens.muted_text,
    )];
    if let Some(hint) = hint {
        let hint_top = top + ICON + GAP;
        let hint_rect = Rect::new(
            anchor.x0 + 24.0,
            hint_top,
            (anchor.x1 - 24.0).max(anchor.x0 + 24.0),
            hint_top + hint_h,
        );
        children.push(text(Role::PlaceholderHint, hint_rect, hint, &hint_style));
    }
    Region::fill(
        Role::Placeholder,
        pane,
        Fill::solid(tokens.surface.fill).with_blur(tokens.surface.blur_px),
    )
    .with_children(children)
}

/// Badge pill (or an empty spacer) on the left, channel label on the right.
pub(crate) fn header(tokens: &StyleTokens, badge: Option<&str>) -> Region {
    let mut header = Region::group(Role::Header, HEADER);
    let mid = HEADER.center().y;

    match badge {
        Some(b) => {
            let label = b.to_uppercase();
            let pad_x = 20.0;
            let gap = 10.0;
            let label_w = estimate_width(&label, CHROME_TEXT_PX, BADGE_TRACKING);
            let w = (pad_x * 2.0 + BADGE_ICON + gap + label_w).min(HEADER.width() * 0.6);
            let rect = Rect::new(
                HEADER.x0,
                mid - BADGE_HEIGHT * 0.5,
                HEADER.x0 + w,
                mid + BADGE_HEIGHT * 0.5,
            );
            let icon_x = rect.x0 + pad_x;
            let icon = Region::icon(
                Role::BadgeIcon,
                Rect::new(
                    icon_x,
                    mid - BADGE_ICON * 0.5,
                    icon_x + BADGE_ICON,
                    mid + BADGE_ICON * 0.5,
                ),
                IconGlyph::Sparkles,
                tokens.badge.text,
            );
            let label_x = icon_x + BADGE_ICON + gap;
            let style = TextStyle::new(CHROME_TEXT_PX, tokens.badge.text, 1)
                .v_align(VAlign::Center)
                .tracking(BADGE_TRACKING);
            let label_rect = Rect::new(label_x, rect.y0, (rect.x1 - pad_x).max(label_x), rect.y1);
            header.push(
                Region::fill(Role::Badge, rect, Fill::solid(tokens.badge.fill))
                    .rounded(BADGE_HEIGHT * 0.5)
                    .with_children(vec![
                        icon,
                        text(Role::BadgeLabel, label_rect, &label, &style),
                    ]),
            );
        }
        None => header.push(Region::group(
            Role::HeaderSpacer,
            Rect::new(HEADER.x0, HEADER.y0, HEADER.x0, HEADER.y1),
        )),
    }

    let style = TextStyle::new(CHROME_TEXT_PX, tokens.muted_text, 1)
        .align(TextAlign::End)
        .v_align(VAlign::Center)
        .tracking(CHANNEL_TRACKING);
    header.push(text(
        Role::ChannelLabel,
        Rect::new(HEADER.x1 - 360.0, HEADER.y0, HEADER.x1, HEADER.y1),
        CHANNEL_LABEL,
        &style,
    ));
    header
}

pub(crate) fn footer(tokens: &StyleTokens) -> Region {
    let (left, right) = columns(FOOTER, 1.0, 1.0, 0.0);
    let start = TextStyle::new(CHROME_TEXT_PX, tokens.muted_text, 1).v_align(VAlign::Center);
    let end = TextStyle::new(CHROME_TEXT_PX, tokens.muted_text, 1)
        .align(TextAlign::End)
        .v_align(VAlign::Center);
    Region::group(Role::Footer, FOOTER).with_children(vec![
        text(Role::FooterBrand, left, FOOTER_BRAND, &start),
        text(Role::FooterFormat, right, FOOTER_FORMAT, &end),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/layout/frame.rs"]
mod tests;
