use super::*;

#[test]
fn capture_target_is_canvas_times_pixel_ratio() {
    let t = RasterTarget::capture(Canvas::FORMAT, EXPORT_PIXEL_RATIO).unwrap();
    assert_eq!((t.width, t.height), (2160, 2160));
    assert!(RasterTarget::capture(Canvas::FORMAT, 0).is_err());
}

#[test]
fn viewport_rejects_empty_and_oversized_surfaces() {
    assert!(RasterTarget::viewport(0, 10).is_err());
    assert!(RasterTarget::viewport(10, 0).is_err());
    assert!(RasterTarget::viewport(MAX_SURFACE_PX + 1, 10).is_err());
    assert!(RasterTarget::viewport(540, 540).is_ok());
}

#[test]
fn transform_scales_logical_space_onto_target() {
    let t = RasterTarget::viewport(540, 540).unwrap();
    let p = t.transform_from(Canvas::FORMAT) * Point::new(1080.0, 540.0);
    assert!((p.x - 540.0).abs() < 1e-9);
    assert!((p.y - 270.0).abs() < 1e-9);
}
