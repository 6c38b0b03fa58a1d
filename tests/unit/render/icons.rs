use super::*;

#[test]
fn icons_parse_at_their_nominal_size() {
    for glyph in [IconGlyph::Image, IconGlyph::Sparkles] {
        let tree = icon_tree(glyph, Rgba8::WHITE).unwrap();
        assert_eq!(tree.size().width(), 24.0);
        assert_eq!(tree.size().height(), 24.0);
    }
}

#[test]
fn rasterized_icon_uses_the_requested_color() {
    let tree = icon_tree(IconGlyph::Image, Rgba8::rgb(255, 0, 0)).unwrap();
    let px = rasterize_svg_to_premul_rgba8(&tree, 48, 48).unwrap();
    assert_eq!(px.len(), 48 * 48 * 4);
    let opaque: Vec<&[u8]> = px.chunks_exact(4).filter(|p| p[3] == 255).collect();
    assert!(!opaque.is_empty());
    assert!(opaque.iter().all(|p| p[0] == 255 && p[1] == 0 && p[2] == 0));
}

#[test]
fn translucent_color_lowers_stroke_alpha() {
    let tree = icon_tree(IconGlyph::Sparkles, Rgba8::WHITE.alpha_pct(50)).unwrap();
    let px = rasterize_svg_to_premul_rgba8(&tree, 48, 48).unwrap();
    let max_a = px.chunks_exact(4).map(|p| p[3]).max().unwrap();
    // Crossing strokes compound to at most 1 - 0.5^2.
    assert!(max_a > 0 && max_a <= 200);
}

#[test]
fn zero_sized_raster_is_an_error() {
    let tree = icon_tree(IconGlyph::Image, Rgba8::WHITE).unwrap();
    assert!(rasterize_svg_to_premul_rgba8(&tree, 0, 10).is_err());
}
