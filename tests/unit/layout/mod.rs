use super::*;
use crate::content::{ContentFields, ImageRef};
use crate::scene::{RegionKind, Role};
use crate::theme::list_themes;

#[test]
fn registry_order_and_lookup() {
    let ids: Vec<&str> = list_layouts().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["split", "focus", "story"]);
    assert_eq!(get_layout("story").unwrap().name, "Narratif");
    assert!(matches!(
        get_layout("grid"),
        Err(StudioError::NotFound { kind: "layout", .. })
    ));
    for id in LayoutId::ALL {
        assert_eq!(layout(id).id, id);
    }
}

#[test]
fn every_archetype_stays_inside_the_body() {
    let body = crate::layout::frame::BODY;
    let full = ContentFields::example();
    let empty = ContentFields::default();
    for theme in list_themes() {
        for l in list_layouts() {
            for content in [&full, &empty] {
                for image in [None, Some(ImageRef(7))] {
                    let fields = PresentFields::from_content(content);
                    let region = l.compose(&theme.tokens, &fields, image, body);
                    assert_eq!(region.role, Role::Body);
                    for r in region.iter() {
                        assert!(
                            r.rect.x0 >= body.x0 - 1e-9
                                && r.rect.y0 >= body.y0 - 1e-9
                                && r.rect.x1 <= body.x1 + 1e-9
                                && r.rect.y1 <= body.y1 + 1e-9,
                            "{:?} {:?} escapes the body: {:?}",
                            l.id,
                            r.role,
                            r.rect
                        );
                    }
                    let images = region
                        .iter()
                        .filter(|r| matches!(r.kind, RegionKind::Image(_)))
                        .count();
                    let placeholders = region.iter().filter(|r| r.role == Role::Placeholder).count();
                    assert_eq!((images, placeholders), if image.is_some() { (1, 0) } else { (0, 1) });
                }
            }
        }
    }
}

#[test]
fn pills_use_the_accent_color() {
    let theme = &list_themes()[2];
    let content = ContentFields::example();
    let fields = PresentFields::from_content(&content);
    for id in [LayoutId::Split, LayoutId::Focus] {
        let body = layout(id).compose(&theme.tokens, &fields, None, crate::layout::frame::BODY);
        let cta = body.iter().find(|r| r.role == Role::Cta).unwrap();
        let RegionKind::Fill(f) = &cta.kind else {
            panic!("cta must be a pill");
        };
        assert_eq!(f.paint, crate::scene::Paint::Solid(theme.tokens.accent));
    }
}

#[test]
fn headline_slot_does_not_depend_on_text_length() {
    let theme = &list_themes()[0];
    let short = ContentFields {
        headline: "Hi".to_string(),
        ..ContentFields::example()
    };
    let long = ContentFields {
        headline: "Un titre beaucoup trop long ".repeat(20),
        ..ContentFields::example()
    };
    for l in list_layouts() {
        let a = l.compose(&theme.tokens, &PresentFields::from_content(&short), None, frame::BODY);
        let b = l.compose(&theme.tokens, &PresentFields::from_content(&long), None, frame::BODY);
        let rects = |r: &Region| r.iter().map(|x| (x.role, x.rect)).collect::<Vec<_>>();
        assert_eq!(rects(&a), rects(&b));
    }
}

#[test]
fn focus_placeholder_fits_above_the_panel() {
    let body = crate::layout::frame::BODY;
    let content = ContentFields::example();
    let fields = PresentFields::from_content(&content);
    let region = layout(LayoutId::Focus).compose(&list_themes()[0].tokens, &fields, None, body);

    let find = |role: Role| region.iter().find(|r| r.role == role).map(|r| r.rect);
    let panel = find(Role::FocusPanel).unwrap();
    let icon = find(Role::PlaceholderIcon).unwrap();
    assert!(find(Role::PlaceholderHint).is_none());
    assert!(icon.y0 > body.y0, "icon flush with the body top: {icon:?}");
    assert!(icon.y1 < panel.y0, "icon {icon:?} runs under the panel {panel:?}");
    assert!((icon.center().x - panel.center().x).abs() < 1e-9);
}
