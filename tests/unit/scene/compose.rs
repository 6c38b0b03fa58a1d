use super::*;
use crate::content::PickedImage;
use crate::layout::{LayoutId, layout};
use crate::scene::RegionKind;
use crate::theme::get_theme;

fn scene_for(layout_id: LayoutId, content: &ContentModel) -> ResolvedScene {
    resolve(get_theme("sunset-glow").unwrap(), layout(layout_id), content)
}

fn text_of(scene: &ResolvedScene, role: Role) -> Option<String> {
    scene.find(role).and_then(|r| match &r.kind {
        RegionKind::Text(t) => Some(t.text.clone()),
        _ => None,
    })
}

#[test]
fn presence_filter_keeps_headline_and_drops_blank_fields() {
    let c = ContentFields {
        headline: "   ".to_string(),
        subheadline: " \n".to_string(),
        price: " 10 € ".to_string(),
        badge: String::new(),
        cta: "\t".to_string(),
        hashtags: String::new(),
    };
    let f = PresentFields::from_content(&c);
    assert_eq!(f.headline, "   ");
    assert_eq!(f.subheadline, None);
    assert_eq!(f.price, Some(" 10 € "));
    assert_eq!(f.badge, None);
    assert_eq!(f.cta, None);
}

#[test]
fn root_is_framed_by_header_body_and_footer() {
    let scene = scene_for(LayoutId::Split, &ContentModel::default());
    let roles: Vec<Role> = scene.root.children.iter().map(|r| r.role).collect();
    assert_eq!(
        roles,
        [Role::Background, Role::DimOverlay, Role::Header, Role::Body, Role::Footer]
    );
    assert_eq!(scene.root.corner_radius, CANVAS_RADIUS);
    assert!(scene.root.clip);
    assert_eq!(scene.layout, LayoutId::Split);
    assert_eq!(scene.theme, "sunset-glow");
    assert_eq!(text_of(&scene, Role::ChannelLabel).as_deref(), Some("FACEBOOK"));
    assert_eq!(text_of(&scene, Role::FooterBrand).as_deref(), Some("© Votre marque"));
}

#[test]
fn example_content_fills_every_text_role() {
    for id in LayoutId::ALL {
        let scene = scene_for(id, &ContentModel::default());
        for role in [Role::Badge, Role::Headline, Role::Subheadline, Role::Price, Role::Cta] {
            assert!(scene.contains(role), "{id} is missing {role:?}");
        }
        assert_eq!(
            text_of(&scene, Role::Headline).as_deref(),
            Some("Nouveau parfum d’été")
        );
        assert!(scene.contains(Role::Placeholder));
        assert!(scene.image_refs().is_empty());
    }
}

#[test]
fn empty_content_keeps_only_mandatory_regions() {
    for id in LayoutId::ALL {
        let scene = scene_for(id, &ContentModel::new(ContentFields::default()));
        for role in [Role::Badge, Role::Subheadline, Role::Price, Role::Cta] {
            assert!(!scene.contains(role), "{id} kept {role:?}");
        }
        assert!(scene.contains(Role::HeaderSpacer));
        assert_eq!(text_of(&scene, Role::Headline).as_deref(), Some(""));
        assert!(scene.contains(Role::Footer));
    }
}

#[test]
fn adopted_image_replaces_placeholder() {
    let mut content = ContentModel::default();
    let img = content.adopt_image(PickedImage::new("p.png", vec![0u8; 4]));
    for id in LayoutId::ALL {
        let scene = scene_for(id, &content);
        assert!(!scene.contains(Role::Placeholder));
        assert_eq!(scene.image_refs(), vec![img]);
    }
    let focus = scene_for(LayoutId::Focus, &content);
    assert_eq!(focus.find(Role::Image).unwrap().opacity, 0.7);
}

#[test]
fn focus_panel_uses_its_text_override() {
    let theme = get_theme("fresh-mint").unwrap();
    let scene = resolve(theme, layout(LayoutId::Focus), &ContentModel::default());
    let headline = scene.find(Role::Headline).unwrap();
    let RegionKind::Text(t) = &headline.kind else {
        panic!("headline must be text");
    };
    assert_eq!(Some(t.color), theme.tokens.focus_panel.text);
}
