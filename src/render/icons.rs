//! Icon glyphs (Lucide outlines) rasterized through `usvg`/`resvg`.

use crate::foundation::color::Rgba8;
use crate::foundation::error::{StudioError, StudioResult};
use crate::scene::IconGlyph;

const IMAGE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect width="18" height="18" x="3" y="3" rx="2" ry="2"/><circle cx="9" cy="9" r="2"/><path d="m21 15-3.086-3.086a2 2 0 0 0-2.828 0L6 21"/></svg>"#;

const SPARKLES_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M9.937 15.5A2 2 0 0 0 8.5 14.063l-6.135-1.582a.5.5 0 0 1 0-.962L8.5 9.936A2 2 0 0 0 9.937 8.5l1.582-6.135a.5.5 0 0 1 .963 0L14.063 8.5A2 2 0 0 0 15.5 9.937l6.135 1.581a.5.5 0 0 1 0 .964L15.5 14.063a2 2 0 0 0-1.437 1.437l-1.582 6.135a.5.5 0 0 1-.963 0z"/><path d="M20 3v4"/><path d="M22 5h-4"/><path d="M4 17v2"/><path d="M5 18H3"/></svg>"#;

fn source(glyph: IconGlyph) -> &'static str {
    match glyph {
        IconGlyph::Image => IMAGE_SVG,
        IconGlyph::Sparkles => SPARKLES_SVG,
    }
}

/// Parse the icon with `currentColor` bound to `color` (alpha included).
pub(crate) fn icon_tree(glyph: IconGlyph, color: Rgba8) -> StudioResult<usvg::Tree> {
    let svg = source(glyph)
        .replace("currentColor", &color.to_hex_rgb())
        .replacen(
            "stroke-width=",
            &format!("stroke-opacity=\"{:.4}\" stroke-width=", color.opacity()),
            1,
        );
    usvg::Tree::from_str(&svg, &usvg::Options::default())
        .map_err(|e| StudioError::render(format!("icon svg parse failed: {e}")))
}

/// Rasterize `tree` into a `width`×`height` premultiplied RGBA8 buffer.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> StudioResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| StudioError::render("failed to allocate icon pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/icons.rs"]
mod tests;
