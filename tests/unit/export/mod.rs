use super::*;
use crate::foundation::color::Rgba8;
use crate::layout::LayoutId;
use crate::scene::{Fill, Region, Role};

fn small_scene(image: Option<ImageRef>) -> ResolvedScene {
    let canvas = Canvas {
        width: 100,
        height: 100,
    };
    let mut root = Region::group(Role::Root, canvas.rect());
    root.push(Region::fill(
        Role::Background,
        canvas.rect(),
        Fill::solid(Rgba8::rgb(200, 40, 40)),
    ));
    if let Some(r) = image {
        root.push(Region::image(Role::Image, canvas.rect(), r));
    }
    ResolvedScene {
        canvas,
        theme: "test".to_string(),
        layout: LayoutId::Focus,
        root,
    }
}

fn no_images() -> BTreeMap<ImageRef, Arc<[u8]>> {
    BTreeMap::new()
}

#[test]
fn busy_guard_is_exclusive_and_released_on_drop() {
    let flag = Arc::new(AtomicBool::new(false));
    let first = BusyGuard::acquire(&flag).unwrap();
    assert!(matches!(
        BusyGuard::acquire(&flag),
        Err(StudioError::ExportBusy)
    ));
    drop(first);
    assert!(!flag.load(Ordering::Acquire));
    assert!(BusyGuard::acquire(&flag).is_ok());
}

#[test]
fn snapshot_copies_only_referenced_images() {
    let source = BTreeMap::from([
        (ImageRef(1), Arc::<[u8]>::from(vec![1u8, 2, 3])),
        (ImageRef(2), Arc::<[u8]>::from(vec![4u8])),
    ]);
    let snap = ImageSnapshot::capture(&small_scene(Some(ImageRef(2))), &source).unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(&*snap.fetch(ImageRef(2)).unwrap(), &[4u8]);
    assert!(snap.fetch(ImageRef(1)).is_err());
}

#[tokio::test]
async fn export_renders_at_twice_the_canvas() {
    let engine = ExportEngine::new(None, MissingFontPolicy::Fail);
    let asset = engine.export(&small_scene(None), &no_images()).await.unwrap();
    assert_eq!(asset.file_name, "facebook-post.png");
    assert_eq!((asset.width, asset.height), (200, 200));
    assert_eq!(asset.pixel_ratio, 2);
    assert_eq!(&asset.png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&asset.png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 200));
    assert!(!engine.is_busy());
}

#[tokio::test]
async fn failed_export_is_tagged_and_clears_busy() {
    let engine = ExportEngine::new(None, MissingFontPolicy::Fail);
    let err = engine
        .export(&small_scene(Some(ImageRef(9))), &no_images())
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::ExportFailure(_)));
    assert!(!engine.is_busy());
    assert!(engine.export(&small_scene(None), &no_images()).await.is_ok());
}

#[tokio::test]
async fn undecodable_image_bytes_fail_the_export() {
    let engine = ExportEngine::new(None, MissingFontPolicy::Fail);
    let images = BTreeMap::from([(ImageRef(1), Arc::<[u8]>::from(b"not a png".to_vec()))]);
    let err = engine
        .export(&small_scene(Some(ImageRef(1))), &images)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::ExportFailure(_)));
}

#[tokio::test]
async fn export_to_delivers_the_asset() {
    let engine = ExportEngine::new(None, MissingFontPolicy::Fail);
    let sink = InMemorySink::new();
    let asset = engine
        .export_to(&small_scene(None), &no_images(), &sink)
        .await
        .unwrap();
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.last(), Some(asset));
}

#[test]
fn download_dir_writes_the_fixed_file_name() {
    let dir = std::env::temp_dir().join(format!("social-studio-export-{}", std::process::id()));
    let sink = DownloadDir::new(&dir);
    let asset = ExportedAsset {
        file_name: EXPORT_FILE_NAME.to_string(),
        logical: Canvas::FORMAT,
        pixel_ratio: 2,
        width: 1,
        height: 1,
        png: vec![1, 2, 3],
    };
    sink.save(&asset).unwrap();

    let path = dir.join("facebook-post.png");
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    assert!(!dir.join(".facebook-post.png.part").exists());
    assert_eq!(sink.path_for(&asset), path);

    std::fs::remove_dir_all(&dir).unwrap();
}
