use super::*;

fn fields(h: &str, s: &str, p: &str, c: &str, t: &str) -> ContentFields {
    ContentFields {
        headline: h.to_string(),
        subheadline: s.to_string(),
        price: p.to_string(),
        badge: "ignored".to_string(),
        cta: c.to_string(),
        hashtags: t.to_string(),
    }
}

#[test]
fn optional_parts_are_dropped_when_blank() {
    let c = assemble(&fields("H", "S", "", "  ", "\n"));
    assert_eq!(c.as_str(), "✨ H\n\nS");
}

#[test]
fn subheadline_is_kept_even_when_empty() {
    let c = assemble(&fields("H", "", "9 €", "", ""));
    assert_eq!(c.as_str(), "✨ H\n\n\n\n💰 9 €");
    assert_eq!(c.paragraphs().collect::<Vec<_>>(), ["✨ H", "", "💰 9 €"]);
}

#[test]
fn present_values_are_verbatim() {
    let c = assemble(&fields(" H ", "S", " 9 € ", "Go", "#a"));
    assert_eq!(c.to_string(), "✨  H \n\nS\n\n💰  9 € \n\n👉 Go\n\n#a");
}

#[test]
fn badge_never_reaches_the_caption() {
    let c = assemble(&ContentFields::example());
    assert!(!c.as_str().contains("Édition limitée"));
}
