use std::time::Duration;

use super::*;
use crate::clipboard::{COPY_CONFIRMATION, MemoryClipboard};
use crate::foundation::error::StudioError;
use crate::scene::Role;

fn session() -> EditorSession {
    EditorSession::new(ThemeRegistry::builtin(), None, MissingFontPolicy::SkipText)
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 200, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

struct Cancel;

impl ImagePicker for Cancel {
    fn pick(&mut self) -> StudioResult<Option<PickedImage>> {
        Ok(None)
    }
}

#[test]
fn starts_on_first_theme_split_layout_and_example_content() {
    let s = session();
    assert_eq!(s.theme().id, "sunset-glow");
    assert_eq!(s.layout().id, LayoutId::Split);
    assert_eq!(s.fields(), &ContentFields::example());
    assert_eq!(s.image(), None);
    assert!(s.scene().contains(Role::Placeholder));
}

#[test]
fn unknown_selection_leaves_state_unchanged() {
    let mut s = session();
    let before = s.scene().fingerprint();
    assert!(matches!(
        s.select_theme("nope"),
        Err(StudioError::NotFound { kind: "theme", .. })
    ));
    assert!(matches!(
        s.select_layout("grid"),
        Err(StudioError::NotFound { kind: "layout", .. })
    ));
    assert_eq!(s.theme().id, "sunset-glow");
    assert_eq!(s.scene().fingerprint(), before);
}

#[test]
fn edits_are_visible_immediately() {
    let mut s = session();
    s.select_layout("focus").unwrap();
    assert_eq!(s.scene().layout, LayoutId::Focus);

    s.select_theme("noir-chic").unwrap();
    assert_eq!(s.scene().theme, "noir-chic");

    s.set_field(TextField::Price, "   ");
    assert!(!s.scene().contains(Role::Price));
    assert!(!s.caption().as_str().contains("💰"));
}

#[test]
fn image_adopt_replace_and_reset() {
    let mut s = session();
    let a = s.adopt_image(PickedImage::new("a.png", tiny_png()));
    let b = s.adopt_image(PickedImage::new("b.png", tiny_png()));
    assert_ne!(a, b);
    assert_eq!(s.live_images(), 1);
    assert_eq!(s.scene().image_refs(), vec![b]);
    assert!(!s.scene().contains(Role::Placeholder));

    assert!(s.reset_image());
    assert_eq!(s.live_images(), 0);
    assert!(s.scene().contains(Role::Placeholder));
    assert!(!s.reset_image());
}

#[test]
fn cancelled_pick_keeps_the_current_image() {
    let mut s = session();
    let a = s.adopt_image(PickedImage::new("a.png", tiny_png()));
    assert_eq!(s.pick_image(&mut Cancel).unwrap(), None);
    assert_eq!(s.image(), Some(a));
}

#[test]
fn display_size_drives_the_preview_only() {
    let mut s = session();
    s.set_display_size(270, 270).unwrap();
    let preview = s.render_preview().unwrap();
    assert_eq!((preview.width, preview.height), (270, 270));
    assert!(s.set_display_size(0, 10).is_err());
    assert_eq!(s.display_size().width, 270);
}

#[test]
fn copy_shows_confirmation_only_on_success() {
    let mut s = session();
    let t0 = Instant::now();

    let mut ok = MemoryClipboard::new();
    s.copy_caption_at(&mut ok, t0).unwrap();
    assert_eq!(ok.contents(), Some(s.caption().as_str()));
    assert!(s.caption_copied_at(t0 + Duration::from_millis(500)));
    assert!(!s.caption_copied_at(t0 + COPY_CONFIRMATION));

    let mut broken = MemoryClipboard::failing();
    assert!(s.copy_caption_at(&mut broken, t0).is_err());
    assert!(!s.caption_copied_at(t0));
}
