use std::cell::Cell;
use std::collections::BTreeMap;

use super::*;
use crate::foundation::core::Canvas;
use crate::layout::LayoutId;
use crate::scene::{Role, TextAlign};

const SMALL: Canvas = Canvas {
    width: 100,
    height: 100,
};

fn scene(children: Vec<Region>) -> ResolvedScene {
    ResolvedScene {
        canvas: SMALL,
        theme: "test".to_string(),
        layout: LayoutId::Split,
        root: Region::group(Role::Root, SMALL.rect()).with_children(children),
    }
}

fn target(w: u32, h: u32) -> RasterTarget {
    RasterTarget::viewport(w, h).unwrap()
}

fn png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Arc<[u8]> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y)));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner().into()
}

fn headline(text: &str) -> Region {
    Region::text(
        Role::Headline,
        Rect::new(10.0, 10.0, 90.0, 40.0),
        TextSpec {
            text: text.to_string(),
            size_px: 20.0,
            color: Rgba8::WHITE,
            align: TextAlign::Start,
            v_align: VAlign::Top,
            letter_spacing: 0.0,
            line_height: 1.25,
            max_lines: 1,
        },
    )
}

struct CountingSource {
    inner: BTreeMap<ImageRef, Arc<[u8]>>,
    fetches: Cell<usize>,
}

impl ImageSource for CountingSource {
    fn fetch(&self, image: ImageRef) -> StudioResult<Arc<[u8]>> {
        self.fetches.set(self.fetches.get() + 1);
        self.inner.fetch(image)
    }
}

fn no_images() -> BTreeMap<ImageRef, Arc<[u8]>> {
    BTreeMap::new()
}

#[test]
fn solid_fill_scales_to_the_target() {
    let s = scene(vec![Region::fill(
        Role::Background,
        Rect::new(0.0, 0.0, 50.0, 100.0),
        Fill::solid(Rgba8::rgb(255, 0, 0)),
    )]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let img = r.render(&s, &no_images(), target(200, 200)).unwrap();
    assert_eq!((img.width, img.height), (200, 200));
    assert_eq!(img.pixel(50, 100), Some([255, 0, 0, 255]));
    assert_eq!(img.pixel(150, 100), Some([0, 0, 0, 0]));
}

#[test]
fn region_opacity_applies_to_its_content() {
    let s = scene(vec![
        Region::fill(Role::Background, SMALL.rect(), Fill::solid(Rgba8::rgb(0, 0, 255)))
            .with_opacity(0.5),
    ]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let img = r.render(&s, &no_images(), target(100, 100)).unwrap();
    let a = img.pixel(50, 50).unwrap()[3];
    assert!((120..=135).contains(&a), "alpha {a}");
}

#[test]
fn clipping_region_hides_overflowing_children() {
    let panel = Region::group(Role::Body, Rect::new(0.0, 0.0, 50.0, 50.0))
        .clipped()
        .with_children(vec![Region::fill(
            Role::ImageDim,
            SMALL.rect(),
            Fill::solid(Rgba8::WHITE),
        )]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let img = r.render(&scene(vec![panel]), &no_images(), target(100, 100)).unwrap();
    assert_eq!(img.pixel(25, 25), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(75, 75).unwrap()[3], 0);
}

#[test]
fn missing_font_fails_when_text_is_present() {
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let err = r
        .render(&scene(vec![headline("Hello")]), &no_images(), target(100, 100))
        .unwrap_err();
    assert!(matches!(err, StudioError::Render(_)));
}

#[test]
fn missing_font_is_fine_without_text() {
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    assert!(r.render(&scene(vec![headline("")]), &no_images(), target(100, 100)).is_ok());
}

#[test]
fn skip_text_policy_renders_everything_else() {
    let s = scene(vec![
        Region::fill(Role::Background, SMALL.rect(), Fill::solid(Rgba8::BLACK)),
        headline("Hello"),
    ]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::SkipText);
    let img = r.render(&s, &no_images(), target(100, 100)).unwrap();
    assert_eq!(img.pixel(20, 20), Some([0, 0, 0, 255]));
}

#[test]
fn image_covers_its_region_center_cropped() {
    // Left half red, right half blue, twice as wide as tall.
    let bytes = png(64, 32, |x, _| if x < 32 { [255, 0, 0, 255] } else { [0, 0, 255, 255] });
    let images = BTreeMap::from([(ImageRef(1), bytes)]);
    let s = scene(vec![Region::image(Role::Image, SMALL.rect(), ImageRef(1))]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let img = r.render(&s, &images, target(100, 100)).unwrap();
    let left = img.pixel(10, 50).unwrap();
    let right = img.pixel(90, 50).unwrap();
    assert!(left[0] > 250 && left[2] < 5, "left {left:?}");
    assert!(right[2] > 250 && right[0] < 5, "right {right:?}");
    assert!(img.pixel(50, 2).unwrap()[3] > 250);
}

#[test]
fn images_are_fetched_again_on_every_render() {
    let source = CountingSource {
        inner: BTreeMap::from([(ImageRef(7), png(4, 4, |_, _| [0, 255, 0, 255]))]),
        fetches: Cell::new(0),
    };
    let s = scene(vec![Region::image(Role::Image, SMALL.rect(), ImageRef(7))]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    r.render(&s, &source, target(50, 50)).unwrap();
    r.render(&s, &source, target(50, 50)).unwrap();
    assert_eq!(source.fetches.get(), 2);
}

#[test]
fn unknown_image_handle_is_an_error() {
    let s = scene(vec![Region::image(Role::Image, SMALL.rect(), ImageRef(3))]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let err = r.render(&s, &no_images(), target(50, 50)).unwrap_err();
    assert!(matches!(err, StudioError::NotFound { kind: "image", .. }));
}

#[test]
fn backdrop_blur_softens_what_lies_beneath() {
    let s = scene(vec![
        Region::fill(
            Role::Background,
            Rect::new(0.0, 0.0, 50.0, 100.0),
            Fill::solid(Rgba8::BLACK),
        ),
        Region::fill(
            Role::DimOverlay,
            Rect::new(50.0, 0.0, 100.0, 100.0),
            Fill::solid(Rgba8::WHITE),
        ),
        Region::fill(
            Role::FocusPanel,
            Rect::new(20.0, 20.0, 80.0, 80.0),
            Fill::solid(Rgba8::TRANSPARENT).with_blur(8),
        ),
    ]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let img = r.render(&s, &no_images(), target(100, 100)).unwrap();

    let edge = img.pixel(50, 50).unwrap();
    assert!((40..=215).contains(&edge[0]), "edge {edge:?}");
    // Outside the panel nothing is blurred.
    assert_eq!(img.pixel(48, 5), Some([0, 0, 0, 255]));
    assert_eq!(img.pixel(52, 5), Some([255, 255, 255, 255]));
}

#[test]
fn oversized_blur_is_capped_instead_of_overflowing() {
    let s = scene(vec![
        Region::fill(Role::Background, SMALL.rect(), Fill::solid(Rgba8::rgb(200, 40, 40))),
        Region::fill(
            Role::Placeholder,
            Rect::new(10.0, 10.0, 90.0, 90.0),
            Fill::solid(Rgba8::WHITE.alpha_pct(10)).with_blur(u32::MAX),
        ),
    ]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let img = r.render(&s, &no_images(), target(200, 200)).unwrap();
    assert_eq!(img.pixel(2, 2), Some([200, 40, 40, 255]));
}

#[test]
fn icons_draw_inside_their_rect() {
    let s = scene(vec![Region::icon(
        Role::PlaceholderIcon,
        Rect::new(0.0, 0.0, 50.0, 50.0),
        IconGlyph::Image,
        Rgba8::WHITE,
    )]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let img = r.render(&s, &no_images(), target(100, 100)).unwrap();
    let mut any_in = false;
    for (x, y) in (0..100).flat_map(|y| (0..100).map(move |x| (x, y))) {
        let a = img.pixel(x, y).unwrap()[3];
        if x > 50 || y > 50 {
            assert_eq!(a, 0, "({x},{y})");
        } else if a > 0 {
            any_in = true;
        }
    }
    assert!(any_in);
}

#[test]
fn renders_are_deterministic() {
    let s = scene(vec![
        Region::fill(Role::Background, SMALL.rect(), Fill::solid(Rgba8::rgb(10, 20, 30))),
        Region::fill(
            Role::FocusPanel,
            Rect::new(10.0, 10.0, 90.0, 90.0),
            Fill::solid(Rgba8::WHITE.alpha_pct(20)).with_blur(4),
        )
        .rounded(12.0),
    ]);
    let mut r = CpuRenderer::new(None, MissingFontPolicy::Fail);
    let a = r.render(&s, &no_images(), target(120, 120)).unwrap();
    let b = r.render(&s, &no_images(), target(120, 120)).unwrap();
    assert_eq!(a, b);
}
