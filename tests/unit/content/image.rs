use super::*;

fn picked(name: &str) -> PickedImage {
    PickedImage::new(name, name.as_bytes().to_vec())
}

#[test]
fn adopt_replaces_previous_image() {
    let mut slot = ImageSlot::default();
    let a = slot.adopt(picked("a.png"));
    let b = slot.adopt(picked("b.png"));
    assert_ne!(a, b);
    assert_eq!(slot.live_count(), 1);
    assert_eq!(slot.current(), Some(b));
    assert!(slot.bytes(a).is_err());
    assert_eq!(&*slot.bytes(b).unwrap(), b"b.png");
    assert_eq!(slot.name(b), Some("b.png"));
}

#[test]
fn releasing_stale_handle_is_a_no_op() {
    let mut slot = ImageSlot::default();
    let a = slot.adopt(picked("a.png"));
    let b = slot.adopt(picked("b.png"));
    assert!(!slot.release(a));
    assert_eq!(slot.current(), Some(b));
    assert!(slot.release(b));
    assert!(!slot.release(b));
    assert_eq!(slot.live_count(), 0);
}

#[test]
fn file_picker_without_path_is_cancelled() {
    assert!(FilePicker::default().pick().unwrap().is_none());
}

#[test]
fn file_picker_rejects_missing_and_non_image_files() {
    let dir = std::env::temp_dir().join(format!("social-studio-picker-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    assert!(FilePicker::new(dir.join("missing.png")).pick().is_err());

    let txt = dir.join("notes.txt");
    std::fs::write(&txt, b"hello").unwrap();
    assert!(FilePicker::new(&txt).pick().is_err());

    let png = dir.join("dot.png");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
        .save(&png)
        .unwrap();
    let got = FilePicker::new(&png).pick().unwrap().unwrap();
    assert_eq!(got.name, "dot.png");

    let _ = std::fs::remove_dir_all(&dir);
}
