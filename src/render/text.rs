use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::FontConfig;
use crate::foundation::error::{StudioError, StudioResult};
use crate::scene::{TextAlign, TextSpec};

/// What to do when no font can be resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFontPolicy {
    /// Rendering a scene with text fails.
    #[default]
    Fail,
    /// Text regions are skipped; everything else renders.
    SkipText,
}

/// Font face bytes shared by every render of a session.
#[derive(Clone)]
pub struct LoadedFont {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
    pub(crate) source: String,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("source", &self.source)
            .field("index", &self.index)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl LoadedFont {
    pub fn from_bytes(bytes: Vec<u8>, source: impl Into<String>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index: 0,
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Resolve the UI font: explicit file, then configured directories, then system sans-serif.
///
/// `Ok(None)` means nothing usable was found; the caller decides via [`MissingFontPolicy`].
pub fn load_font(cfg: &FontConfig) -> StudioResult<Option<Arc<LoadedFont>>> {
    if let Some(path) = &cfg.font_file {
        let bytes = std::fs::read(path).map_err(|e| {
            StudioError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        tracing::info!(font = %path.display(), "using configured font file");
        return Ok(Some(Arc::new(LoadedFont::from_bytes(
            bytes,
            path.display().to_string(),
        ))));
    }

    let mut db = usvg::fontdb::Database::new();
    for dir in &cfg.font_dirs {
        db.load_fonts_dir(dir);
    }
    if cfg.system_fonts {
        db.load_system_fonts();
    }

    let families = [usvg::fontdb::Family::SansSerif];
    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::NORMAL,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    let Some(id) = db.query(&query).or_else(|| db.faces().next().map(|f| f.id)) else {
        tracing::warn!(
            dirs = cfg.font_dirs.len(),
            system = cfg.system_fonts,
            "no font face found"
        );
        return Ok(None);
    };
    let source = db
        .face(id)
        .map(|f| {
            f.families
                .first()
                .map(|(name, _)| name.clone())
                .unwrap_or_else(|| f.post_script_name.clone())
        })
        .unwrap_or_default();
    let font = db.with_face_data(id, |data, index| LoadedFont {
        bytes: Arc::new(data.to_vec()),
        index,
        source,
    });
    if let Some(f) = &font {
        tracing::info!(font = %f.source, "resolved font");
    }
    Ok(font.map(Arc::new))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Glyphs of a text region, positioned relative to the region's top-left corner in logical pixels.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapedText {
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    pub(crate) font_size: f32,
    pub(crate) lines: usize,
    /// Total height of the kept lines.
    pub(crate) height: f64,
}

/// Parley-backed shaping for one font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: &LoadedFont) -> StudioResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StudioError::render("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StudioError::render("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
            font.index,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font: data,
        })
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Wrap `spec` to `max_width`, keep at most `spec.max_lines` lines and position every glyph.
    pub(crate) fn shape(&mut self, spec: &TextSpec, max_width: f32) -> StudioResult<ShapedText> {
        if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
            return Err(StudioError::render("text size must be finite and > 0"));
        }
        if spec.text.is_empty() || spec.max_lines == 0 {
            return Ok(ShapedText::default());
        }

        let brush = TextBrushRgba8 {
            r: spec.color.r,
            g: spec.color.g,
            b: spec.color.b,
            a: spec.color.a,
        };
        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut self.font_ctx, &spec.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(spec.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if spec.letter_spacing != 0.0 {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(
                spec.letter_spacing,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&spec.text);
        let max_width = max_width.max(1.0);
        layout.break_all_lines(Some(max_width));
        layout.align(
            Some(max_width),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let line_box = spec.size_px * spec.line_height;
        let mut out = ShapedText {
            font_size: spec.size_px,
            ..ShapedText::default()
        };
        for (i, line) in layout.lines().take(spec.max_lines as usize).enumerate() {
            let m = line.metrics();
            let used = (m.advance - m.trailing_whitespace).max(0.0);
            let dx = match spec.align {
                TextAlign::Start => 0.0,
                TextAlign::Center => ((max_width - used) * 0.5).max(0.0),
                TextAlign::End => (max_width - used).max(0.0),
            };
            let top = i as f32 * line_box;
            let baseline = top + (line_box - (m.ascent + m.descent)) * 0.5 + m.ascent;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                out.glyphs
                    .extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x + dx,
                        y: baseline + (g.y - m.baseline),
                    }));
            }
            out.lines = i + 1;
        }
        out.height = f64::from(line_box) * out.lines as f64;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
