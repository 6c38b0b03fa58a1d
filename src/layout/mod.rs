//! The fixed set of layout archetypes.
//!
//! Each archetype is a pure function from style tokens, the already-filtered content fields and
//! an optional image handle to the region tree of the canvas body. Header, footer and the canvas
//! frame are shared by every archetype (see [`frame`]).

pub(crate) mod frame;

mod focus;
mod split;
mod story;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::ImageRef;
use crate::foundation::core::Rect;
use crate::foundation::error::{StudioError, StudioResult};
use crate::scene::{PresentFields, Region};
use crate::theme::StyleTokens;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutId {
    Split,
    Focus,
    Story,
}

impl LayoutId {
    pub const ALL: [Self; 3] = [Self::Split, Self::Focus, Self::Story];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Focus => "focus",
            Self::Story => "story",
        }
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutId {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| StudioError::not_found("layout", s))
    }
}

/// Composes the body of the canvas inside `body`.
///
/// Must be total: any tokens, any subset of present fields, image present or absent.
pub type ComposeFn = fn(&StyleTokens, &PresentFields<'_>, Option<ImageRef>, Rect) -> Region;

#[derive(Clone, Copy)]
pub struct LayoutArchetype {
    pub id: LayoutId,
    pub name: &'static str,
    pub description: &'static str,
    compose: ComposeFn,
}

impl LayoutArchetype {
    pub fn compose(
        &self,
        tokens: &StyleTokens,
        fields: &PresentFields<'_>,
        image: Option<ImageRef>,
        body: Rect,
    ) -> Region {
        (self.compose)(tokens, fields, image, body)
    }
}

impl fmt::Debug for LayoutArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutArchetype")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static LAYOUTS: [LayoutArchetype; 3] = [
    LayoutArchetype {
        id: LayoutId::Split,
        name: "Visuel + texte",
        description: "Produit en évidence avec texte sur le côté",
        compose: split::compose,
    },
    LayoutArchetype {
        id: LayoutId::Focus,
        name: "Focus produit",
        description: "Produit au centre, texte en superposition",
        compose: focus::compose,
    },
    LayoutArchetype {
        id: LayoutId::Story,
        name: "Narratif",
        description: "Texte principal en grand, visuel secondaire",
        compose: story::compose,
    },
];

/// Layout archetypes in display order.
pub fn list_layouts() -> &'static [LayoutArchetype] {
    &LAYOUTS
}

pub fn layout(id: LayoutId) -> &'static LayoutArchetype {
    match id {
        LayoutId::Split => &LAYOUTS[0],
        LayoutId::Focus => &LAYOUTS[1],
        LayoutId::Story => &LAYOUTS[2],
    }
}

pub fn get_layout(id: &str) -> StudioResult<&'static LayoutArchetype> {
    id.parse::<LayoutId>().map(layout)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mod.rs"]
mod tests;
