use super::*;

#[test]
fn memory_clipboard_keeps_the_last_write() {
    let mut cb = MemoryClipboard::new();
    assert_eq!(cb.contents(), None);
    cb.write_text("a").unwrap();
    cb.write_text("b").unwrap();
    assert_eq!(cb.contents(), Some("b"));
}

#[test]
fn failing_clipboard_reports_a_clipboard_error() {
    let mut cb = MemoryClipboard::failing();
    assert!(matches!(
        cb.write_text("x"),
        Err(StudioError::ClipboardFailure(_))
    ));
    assert_eq!(cb.contents(), None);
}

#[test]
fn indicator_expires_after_the_confirmation_window() {
    let t0 = Instant::now();
    let mut ind = CopyIndicator::default();
    assert!(!ind.is_shown_at(t0));

    ind.show(t0);
    assert!(ind.is_shown_at(t0));
    assert!(ind.is_shown_at(t0 + Duration::from_millis(1799)));
    assert!(!ind.is_shown_at(t0 + COPY_CONFIRMATION));

    ind.show(t0);
    ind.clear();
    assert!(!ind.is_shown_at(t0));
}
