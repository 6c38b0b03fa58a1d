use std::collections::HashMap;
use std::sync::Arc;

use crate::content::ImageRef;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, RasterTarget, Rect};
use crate::foundation::error::{StudioError, StudioResult};
use crate::render::icons::{icon_tree, rasterize_svg_to_premul_rgba8};
use crate::render::raster::{
    DecodedImage, PixelWindow, affine_to_cpu, blur_rgba8_premul_q16, color_to_cpu,
    crop_downsample, decode_image, diagonal_gradient_premul, gaussian_kernel_q16,
    image_from_premul, rect_to_cpu, shape_path,
};
use crate::render::text::{LoadedFont, MissingFontPolicy, ShapedText, TextLayoutEngine};
use crate::render::{ImageSource, RenderedImage};
use crate::scene::{
    Border, Fill, IconGlyph, IconSpec, ImageFill, Paint, Region, RegionKind, ResolvedScene, TextSpec,
    VAlign,
};
use crate::theme::MAX_BLUR_PX;

const GRADIENT_MAX_PX: u32 = 512;
const BLUR_MAX_DOWNSAMPLE: u32 = 64;
const IMAGE_MAX_EDGE: u32 = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct IconKey {
    glyph: IconGlyph,
    color: Rgba8,
    w: u32,
    h: u32,
}

/// Pre-blurred copy of what lies beneath a backdrop-blurred region, in target pixels.
struct BlurPatch {
    image: vello_cpu::Image,
    x0: f64,
    y0: f64,
    scale: f64,
    width: u32,
    height: u32,
}

/// State of one `render` call, shared by its passes.
struct Frame {
    tf: Affine,
    target: RasterTarget,
    images: HashMap<ImageRef, DecodedImage>,
    text: Option<TextLayoutEngine>,
    shaped: HashMap<usize, ShapedText>,
    patches: HashMap<usize, BlurPatch>,
}

/// Draws resolved scenes with `vello_cpu`.
///
/// Backdrop blur needs the pixels beneath a region, so every blurred region costs one extra pass
/// that stops right before it. User images are decoded again on every `render` call.
pub struct CpuRenderer {
    font: Option<Arc<LoadedFont>>,
    missing_font: MissingFontPolicy,
    ctx: Option<vello_cpu::RenderContext>,
    icon_cache: HashMap<IconKey, vello_cpu::Image>,
}

impl CpuRenderer {
    pub fn new(font: Option<Arc<LoadedFont>>, missing_font: MissingFontPolicy) -> Self {
        Self {
            font,
            missing_font,
            ctx: None,
            icon_cache: HashMap::new(),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(layout = %scene.layout, width = target.width, height = target.height)
    )]
    pub fn render(
        &mut self,
        scene: &ResolvedScene,
        images: &dyn ImageSource,
        target: RasterTarget,
    ) -> StudioResult<RenderedImage> {
        let mut frame = Frame {
            tf: target.transform_from(scene.canvas),
            target,
            images: decode_scene_images(scene, images)?,
            text: self.text_engine(scene)?,
            shaped: HashMap::new(),
            patches: HashMap::new(),
        };

        let blurred: Vec<(usize, &Region, u32)> = scene
            .regions()
            .enumerate()
            .filter_map(|(i, r)| match &r.kind {
                RegionKind::Fill(f) if f.backdrop_blur_px > 0 => Some((i, r, f.backdrop_blur_px)),
                _ => None,
            })
            .collect();
        for (idx, region, blur_px) in blurred {
            let backdrop = self.pass(scene, &mut frame, Some(idx))?;
            if let Some(patch) = blur_patch(&backdrop, &frame, region, blur_px)? {
                frame.patches.insert(idx, patch);
            }
        }

        let pixmap = self.pass(scene, &mut frame, None)?;
        tracing::debug!(blur_passes = frame.patches.len(), "rendered scene");
        RenderedImage::new(
            target.width,
            target.height,
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    fn text_engine(&self, scene: &ResolvedScene) -> StudioResult<Option<TextLayoutEngine>> {
        if let Some(font) = &self.font {
            return TextLayoutEngine::new(font).map(Some);
        }
        let needs_text = scene
            .regions()
            .any(|r| matches!(&r.kind, RegionKind::Text(t) if !t.text.is_empty()));
        match self.missing_font {
            _ if !needs_text => Ok(None),
            MissingFontPolicy::Fail => Err(StudioError::render(
                "no usable font: set fonts.font_file or fonts.missing_font = \"skip_text\"",
            )),
            MissingFontPolicy::SkipText => {
                tracing::warn!("no usable font; text regions are skipped");
                Ok(None)
            }
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> StudioResult<R>,
    ) -> StudioResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    /// Draw the scene in pre-order, stopping before region `stop_at` when given.
    fn pass(
        &mut self,
        scene: &ResolvedScene,
        frame: &mut Frame,
        stop_at: Option<usize>,
    ) -> StudioResult<vello_cpu::Pixmap> {
        let w = u16::try_from(frame.target.width)
            .map_err(|_| StudioError::render("target width exceeds u16"))?;
        let h = u16::try_from(frame.target.height)
            .map_err(|_| StudioError::render("target height exceeds u16"))?;
        self.with_ctx_mut(w, h, |this, ctx| {
            let mut next = 0usize;
            this.draw_region(ctx, frame, &scene.root, stop_at, &mut next)?;
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap)
        })
    }

    /// Returns `true` once `stop_at` has been reached.
    fn draw_region(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        frame: &mut Frame,
        region: &Region,
        stop_at: Option<usize>,
        next: &mut usize,
    ) -> StudioResult<bool> {
        let idx = *next;
        *next += 1;
        if stop_at == Some(idx) {
            return Ok(true);
        }

        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let layered = region.opacity < 1.0;
        if layered {
            ctx.push_opacity_layer(region.opacity);
        }

        match &region.kind {
            RegionKind::Group => {}
            RegionKind::Fill(fill) => draw_fill(ctx, frame, region, fill, idx)?,
            RegionKind::Text(spec) => draw_text(ctx, frame, region, spec, idx)?,
            RegionKind::Image(img) => draw_image(ctx, frame, region, img)?,
            RegionKind::Icon(icon) => self.draw_icon(ctx, frame, region, icon)?,
        }

        let mut stopped = false;
        if !region.children.is_empty() {
            if region.clip {
                ctx.set_transform(affine_to_cpu(frame.tf));
                ctx.push_clip_layer(&shape_path(region.rect, region.corner_radius));
            }
            for child in &region.children {
                if self.draw_region(ctx, frame, child, stop_at, next)? {
                    stopped = true;
                    break;
                }
            }
            if region.clip {
                ctx.pop_layer();
            }
        }
        match &region.kind {
            RegionKind::Fill(Fill {
                border: Some(border),
                ..
            }) if !stopped => draw_border(ctx, frame, region, border),
            _ => {}
        }

        if layered {
            ctx.pop_layer();
        }
        Ok(stopped)
    }

    fn draw_icon(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        frame: &Frame,
        region: &Region,
        icon: &IconSpec,
    ) -> StudioResult<()> {
        let px = frame.tf.transform_rect_bbox(region.rect);
        let key = IconKey {
            glyph: icon.glyph,
            color: icon.color,
            w: (px.width().round() as u32).max(1),
            h: (px.height().round() as u32).max(1),
        };
        let img = match self.icon_cache.get(&key) {
            Some(img) => img.clone(),
            None => {
                let tree = icon_tree(icon.glyph, icon.color)?;
                let rgba = rasterize_svg_to_premul_rgba8(&tree, key.w, key.h)?;
                let img = image_from_premul(&rgba, key.w, key.h)?;
                self.icon_cache.insert(key, img.clone());
                img
            }
        };
        ctx.set_transform(affine_to_cpu(Affine::translate((
            px.x0.round(),
            px.y0.round(),
        ))));
        ctx.set_paint(img);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(key.w),
            f64::from(key.h),
        ));
        Ok(())
    }
}

/// Backdrop patch first, then the paint.
fn draw_fill(
    ctx: &mut vello_cpu::RenderContext,
    frame: &Frame,
    region: &Region,
    fill: &Fill,
    idx: usize,
) -> StudioResult<()> {
    let shape = shape_path(region.rect, region.corner_radius);

    if let Some(patch) = frame.patches.get(&idx) {
        ctx.set_transform(affine_to_cpu(frame.tf));
        ctx.push_clip_layer(&shape);
        ctx.set_transform(affine_to_cpu(
            Affine::translate((patch.x0, patch.y0)) * Affine::scale(patch.scale),
        ));
        ctx.set_paint(patch.image.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(patch.width),
            f64::from(patch.height),
        ));
        ctx.pop_layer();
    }

    match fill.paint {
        Paint::Solid(c) => {
            ctx.set_transform(affine_to_cpu(frame.tf));
            ctx.set_paint(color_to_cpu(c));
            ctx.fill_path(&shape);
        }
        Paint::DiagonalGradient(g) => {
            let px = frame.tf.transform_rect_bbox(region.rect);
            let gw = (px.width().ceil() as u32).clamp(1, GRADIENT_MAX_PX);
            let gh = (px.height().ceil() as u32).clamp(1, GRADIENT_MAX_PX);
            let img = image_from_premul(&diagonal_gradient_premul(&g, gw, gh), gw, gh)?;

            ctx.set_transform(affine_to_cpu(frame.tf));
            ctx.push_clip_layer(&shape);
            ctx.set_transform(affine_to_cpu(
                frame.tf
                    * Affine::translate((region.rect.x0, region.rect.y0))
                    * Affine::scale_non_uniform(
                        region.rect.width() / f64::from(gw),
                        region.rect.height() / f64::from(gh),
                    ),
            ));
            ctx.set_paint(img);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(gw),
                f64::from(gh),
            ));
            ctx.pop_layer();
        }
    }

    Ok(())
}

/// Stroke drawn inside the region's outline, on top of its children.
fn draw_border(
    ctx: &mut vello_cpu::RenderContext,
    frame: &Frame,
    region: &Region,
    border: &Border,
) {
    let half = border.width * 0.5;
    let r = region.rect;
    let inner = Rect::new(
        r.x0 + half,
        r.y0 + half,
        (r.x1 - half).max(r.x0 + half),
        (r.y1 - half).max(r.y0 + half),
    );
    ctx.set_transform(affine_to_cpu(frame.tf));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(border.width));
    ctx.set_paint(color_to_cpu(border.color));
    ctx.stroke_path(&shape_path(inner, (region.corner_radius - half).max(0.0)));
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    frame: &mut Frame,
    region: &Region,
    spec: &TextSpec,
    idx: usize,
) -> StudioResult<()> {
    let Some(engine) = frame.text.as_mut() else {
        return Ok(());
    };
    if !frame.shaped.contains_key(&idx) {
        let shaped = engine.shape(spec, region.rect.width() as f32)?;
        frame.shaped.insert(idx, shaped);
    }
    let Some(shaped) = frame.shaped.get(&idx) else {
        return Ok(());
    };
    if shaped.glyphs.is_empty() {
        return Ok(());
    }

    let free = (region.rect.height() - shaped.height).max(0.0);
    let dy = match spec.v_align {
        VAlign::Top => 0.0,
        VAlign::Center => free * 0.5,
        VAlign::Bottom => free,
    };

    ctx.set_transform(affine_to_cpu(frame.tf));
    ctx.push_clip_layer(&shape_path(region.rect, 0.0));
    ctx.set_transform(affine_to_cpu(
        frame.tf * Affine::translate((region.rect.x0, region.rect.y0 + dy)),
    ));
    ctx.set_paint(color_to_cpu(spec.color));
    let glyphs = shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
        id: g.id,
        x: g.x,
        y: g.y,
    });
    ctx.glyph_run(engine.font())
        .font_size(shaped.font_size)
        .fill_glyphs(glyphs);
    ctx.pop_layer();
    Ok(())
}

/// Draw the image scaled to cover the region, cropped to the region's outline.
fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    frame: &Frame,
    region: &Region,
    fill: &ImageFill,
) -> StudioResult<()> {
    let img = frame
        .images
        .get(&fill.image)
        .ok_or_else(|| StudioError::render(format!("image {} was not decoded", fill.image.0)))?;
    let (iw, ih) = (f64::from(img.width), f64::from(img.height));
    let r = region.rect;
    let s = (r.width() / iw).max(r.height() / ih);
    let dx = r.x0 + (r.width() - iw * s) * 0.5;
    let dy = r.y0 + (r.height() - ih * s) * 0.5;

    ctx.set_transform(affine_to_cpu(frame.tf));
    ctx.push_clip_layer(&shape_path(r, region.corner_radius));
    ctx.set_transform(affine_to_cpu(
        frame.tf * Affine::translate((dx, dy)) * Affine::scale(s),
    ));
    ctx.set_paint(img.paint.clone());
    ctx.fill_rect(&rect_to_cpu(Rect::new(0.0, 0.0, iw, ih)));
    ctx.pop_layer();
    Ok(())
}

fn decode_scene_images(
    scene: &ResolvedScene,
    source: &dyn ImageSource,
) -> StudioResult<HashMap<ImageRef, DecodedImage>> {
    let mut out = HashMap::new();
    for r in scene.image_refs() {
        if out.contains_key(&r) {
            continue;
        }
        let bytes = source.fetch(r)?;
        let decoded = decode_image(&bytes, IMAGE_MAX_EDGE)?;
        tracing::debug!(
            image = r.0,
            width = decoded.width,
            height = decoded.height,
            "decoded image"
        );
        out.insert(r, decoded);
    }
    Ok(out)
}

/// Blur the backdrop under `region` on a downsampled crop.
fn blur_patch(
    backdrop: &vello_cpu::Pixmap,
    frame: &Frame,
    region: &Region,
    blur_px: u32,
) -> StudioResult<Option<BlurPatch>> {
    let scale = frame.tf.as_coeffs()[0].abs();
    let sigma = f64::from(blur_px.min(MAX_BLUR_PX)) * scale;
    if sigma < 0.5 {
        return Ok(None);
    }
    let factor = ((sigma / 2.0).floor() as u32).clamp(1, BLUR_MAX_DOWNSAMPLE);
    let sigma_small = sigma / f64::from(factor);
    let radius_small = (sigma_small * 3.0).ceil() as u32;

    let px = frame.tf.transform_rect_bbox(region.rect);
    let margin = f64::from(radius_small) * f64::from(factor);
    let sw = u32::from(backdrop.width());
    let sh = u32::from(backdrop.height());
    let Some(win) = PixelWindow::covering(px, margin, sw, sh) else {
        return Ok(None);
    };

    let (small, w, h) = crop_downsample(backdrop.data_as_u8_slice(), sw, win, factor);
    let kernel = gaussian_kernel_q16(radius_small, sigma_small as f32)?;
    let mut dst = vec![0u8; small.len()];
    let mut tmp = vec![0u8; small.len()];
    blur_rgba8_premul_q16(&small, &mut dst, &mut tmp, w, h, &kernel);

    Ok(Some(BlurPatch {
        image: image_from_premul(&dst, w, h)?,
        x0: f64::from(win.x0),
        y0: f64::from(win.y0),
        scale: f64::from(factor),
        width: w,
        height: h,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
