use super::*;

#[test]
fn presence_predicate_trims_whitespace() {
    assert!(!is_present(""));
    assert!(!is_present("  \t\n"));
    assert!(is_present(" x "));
}

#[test]
fn example_defaults_and_field_access() {
    let mut c = ContentFields::example();
    assert_eq!(c.get(TextField::Price), "49,90 €");
    assert_eq!(c.get(TextField::Badge), "Édition limitée");

    c.set(TextField::Cta, "Acheter");
    assert_eq!(c.cta, "Acheter");

    assert_eq!("hashtags".parse::<TextField>().unwrap(), TextField::Hashtags);
    assert!("title".parse::<TextField>().is_err());
}

#[test]
fn content_json_fills_missing_fields_with_empty() {
    let c = ContentFields::from_json(r#"{"headline":"Soldes"}"#).unwrap();
    assert_eq!(c.headline, "Soldes");
    assert_eq!(c.price, "");
    assert!(ContentFields::from_json(r#"{"title":"x"}"#).is_err());
}

#[test]
fn model_starts_with_example_and_no_image() {
    let mut m = ContentModel::default();
    assert_eq!(m.fields, ContentFields::example());
    assert_eq!(m.image(), None);
    assert!(!m.clear_image());

    let r = m.adopt_image(PickedImage::new("a.png", vec![1u8, 2, 3]));
    assert_eq!(m.image(), Some(r));
    assert!(m.clear_image());
    assert_eq!(m.images().live_count(), 0);
}
