//! Caption text accompanying the exported image.

use std::fmt;

use crate::content::{ContentFields, is_present};

const SEPARATOR: &str = "\n\n";

/// Plain-text caption, identical for preview and clipboard.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Caption(String);

impl Caption {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Paragraphs in order.
    pub fn paragraphs(&self) -> std::str::Split<'_, &'static str> {
        self.0.split(SEPARATOR)
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Caption {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Assemble the caption paragraphs separated by a blank line.
///
/// The headline (with its marker) and the subheadline are always emitted, even when empty.
/// Price, call-to-action and hashtags are emitted only when present. Values are copied verbatim.
pub fn assemble(content: &ContentFields) -> Caption {
    let mut parts: Vec<String> = Vec::with_capacity(5);
    parts.push(format!("✨ {}", content.headline));
    parts.push(content.subheadline.clone());
    if is_present(&content.price) {
        parts.push(format!("💰 {}", content.price));
    }
    if is_present(&content.cta) {
        parts.push(format!("👉 {}", content.cta));
    }
    if is_present(&content.hashtags) {
        parts.push(content.hashtags.clone());
    }
    Caption(parts.join(SEPARATOR))
}

#[cfg(test)]
#[path = "../tests/unit/caption.rs"]
mod tests;
