//! User-editable post content: the text fields plus the single live product image.

mod image;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{StudioError, StudioResult};

pub use self::image::{FilePicker, ImagePicker, ImageRef, ImageSlot, PickedImage};

/// A field counts as present when its trimmed value is non-empty.
///
/// This is the one presence predicate shared by scene composition and caption assembly.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// The free-form text fields of a post. Every field may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentFields {
    pub headline: String,
    pub subheadline: String,
    pub price: String,
    pub badge: String,
    pub cta: String,
    pub hashtags: String,
}

impl ContentFields {
    /// Example content a fresh editor session starts with.
    pub fn example() -> Self {
        Self {
            headline: "Nouveau parfum d’été".to_string(),
            subheadline: "Fraîcheur tropicale pour illuminer vos journées.".to_string(),
            price: "49,90 €".to_string(),
            badge: "Édition limitée".to_string(),
            cta: "Commander maintenant".to_string(),
            hashtags: "#nouveauté #madeinfrance #bonplan".to_string(),
        }
    }

    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::Headline => &self.headline,
            TextField::Subheadline => &self.subheadline,
            TextField::Price => &self.price,
            TextField::Badge => &self.badge,
            TextField::Cta => &self.cta,
            TextField::Hashtags => &self.hashtags,
        }
    }

    pub fn set(&mut self, field: TextField, value: impl Into<String>) {
        let slot = match field {
            TextField::Headline => &mut self.headline,
            TextField::Subheadline => &mut self.subheadline,
            TextField::Price => &mut self.price,
            TextField::Badge => &mut self.badge,
            TextField::Cta => &mut self.cta,
            TextField::Hashtags => &mut self.hashtags,
        };
        *slot = value.into();
    }

    pub fn from_json(json: &str) -> StudioResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| StudioError::validation(format!("invalid content json: {e}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Headline,
    Subheadline,
    Price,
    Badge,
    Cta,
    Hashtags,
}

impl TextField {
    pub const ALL: [Self; 6] = [
        Self::Headline,
        Self::Subheadline,
        Self::Price,
        Self::Badge,
        Self::Cta,
        Self::Hashtags,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Subheadline => "subheadline",
            Self::Price => "price",
            Self::Badge => "badge",
            Self::Cta => "cta",
            Self::Hashtags => "hashtags",
        }
    }
}

impl FromStr for TextField {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| StudioError::not_found("field", s))
    }
}

/// Text fields plus the image slot, owned by the editor session.
#[derive(Debug)]
pub struct ContentModel {
    pub fields: ContentFields,
    images: ImageSlot,
}

impl ContentModel {
    pub fn new(fields: ContentFields) -> Self {
        Self {
            fields,
            images: ImageSlot::default(),
        }
    }

    /// Handle of the live image, if any.
    pub fn image(&self) -> Option<ImageRef> {
        self.images.current()
    }

    pub fn images(&self) -> &ImageSlot {
        &self.images
    }

    pub fn adopt_image(&mut self, picked: PickedImage) -> ImageRef {
        self.images.adopt(picked)
    }

    /// Release the live image. Returns `false` when there was none.
    pub fn clear_image(&mut self) -> bool {
        match self.images.current() {
            Some(r) => self.images.release(r),
            None => false,
        }
    }
}

impl Default for ContentModel {
    fn default() -> Self {
        Self::new(ContentFields::example())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/mod.rs"]
mod tests;
