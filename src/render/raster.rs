//! Pixel-level helpers: pixmap conversion, gradient images and the fixed-point Gaussian blur used
//! for backdrop blur.
//!
//! All buffers are row-major premultiplied RGBA8 unless stated otherwise.

use std::sync::Arc;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::theme::Gradient3;

pub(crate) fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Outline of `rect` with `radius` rounded corners (a plain rectangle when `radius <= 0`).
pub(crate) fn shape_path(rect: kurbo::Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::Shape;

    let mut p = vello_cpu::kurbo::BezPath::new();
    if radius > 0.0 {
        let r = radius.min(rect.width() * 0.5).min(rect.height() * 0.5);
        for el in kurbo::RoundedRect::from_rect(rect, r).path_elements(0.1) {
            p.push(el);
        }
    } else {
        for el in rect.path_elements(0.1) {
            p.push(el);
        }
    }
    p
}

pub(crate) fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> StudioResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| StudioError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| StudioError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(StudioError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

pub(crate) fn image_from_premul(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> StudioResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Decoded picture ready to be drawn.
#[derive(Clone)]
pub(crate) struct DecodedImage {
    pub(crate) paint: vello_cpu::Image,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Decode encoded image bytes, downscaling so neither edge exceeds `max_edge`.
pub(crate) fn decode_image(bytes: &[u8], max_edge: u32) -> StudioResult<DecodedImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| StudioError::render(format!("image decode failed: {e}")))?;
    let img = if img.width() > max_edge || img.height() > max_edge {
        img.resize(max_edge, max_edge, image::imageops::FilterType::Triangle)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(StudioError::render("image has zero size"));
    }
    let mut bytes = rgba.into_raw();
    premultiply_rgba8_in_place(&mut bytes);
    Ok(DecodedImage {
        paint: image_from_premul(&bytes, width, height)?,
        width,
        height,
    })
}

/// Three-stop gradient along the top-left to bottom-right diagonal, rendered at `w`×`h`.
pub(crate) fn diagonal_gradient_premul(g: &Gradient3, w: u32, h: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let lerp = |a: Rgba8, b: Rgba8, t: f32| -> [u8; 4] {
        let l = |x: u8, y: u8| -> u8 {
            let xf = f32::from(x);
            (xf + (f32::from(y) - xf) * t).round().clamp(0.0, 255.0) as u8
        };
        [l(a.r, b.r), l(a.g, b.g), l(a.b, b.b), l(a.a, b.a)]
    };
    for y in 0..h {
        let ty = (y as f32 + 0.5) / h.max(1) as f32;
        for x in 0..w {
            let tx = (x as f32 + 0.5) / w.max(1) as f32;
            let t = (tx + ty) * 0.5;
            let c = if t < 0.5 {
                lerp(g.from, g.via, t * 2.0)
            } else {
                lerp(g.via, g.to, (t - 0.5) * 2.0)
            };
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&Rgba8::rgba(c[0], c[1], c[2], c[3]).to_premul());
        }
    }
    bytes
}

/// Integer pixel window inside a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelWindow {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl PixelWindow {
    /// Smallest window covering `r` grown by `margin`, clamped to a `surface_w`×`surface_h` surface.
    pub(crate) fn covering(r: kurbo::Rect, margin: f64, surface_w: u32, surface_h: u32) -> Option<Self> {
        let clamp = |v: f64, max: u32| -> u32 { v.clamp(0.0, f64::from(max)) as u32 };
        let x0 = clamp((r.x0 - margin).floor(), surface_w);
        let y0 = clamp((r.y0 - margin).floor(), surface_h);
        let x1 = clamp((r.x1 + margin).ceil(), surface_w);
        let y1 = clamp((r.y1 + margin).ceil(), surface_h);
        (x1 > x0 && y1 > y0).then_some(Self {
            x0,
            y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// Copy `win` out of a `src_w`-wide surface and box-downsample it by `factor`.
///
/// Returns the downsampled bytes and their dimensions (`ceil(win / factor)`).
pub(crate) fn crop_downsample(
    src: &[u8],
    src_w: u32,
    win: PixelWindow,
    factor: u32,
) -> (Vec<u8>, u32, u32) {
    let f = factor.max(1);
    let out_w = win.width.div_ceil(f);
    let out_h = win.height.div_ceil(f);
    let mut out = vec![0u8; (out_w as usize) * (out_h as usize) * 4];
    for oy in 0..out_h {
        for ox in 0..out_w {
            let mut acc = [0u32; 4];
            let mut n = 0u32;
            let sy0 = oy * f;
            let sx0 = ox * f;
            for sy in sy0..(sy0 + f).min(win.height) {
                for sx in sx0..(sx0 + f).min(win.width) {
                    let idx = (((win.y0 + sy) as usize) * (src_w as usize)
                        + (win.x0 + sx) as usize)
                        * 4;
                    for c in 0..4 {
                        acc[c] += u32::from(src[idx + c]);
                    }
                    n += 1;
                }
            }
            let o = ((oy as usize) * (out_w as usize) + ox as usize) * 4;
            for c in 0..4 {
                out[o + c] = ((acc[c] + n / 2) / n.max(1)) as u8;
            }
        }
    }
    (out, out_w, out_h)
}

pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> StudioResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StudioError::render("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(StudioError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|&wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    // Push the rounding error into the center tap so the kernel sums to exactly 1.0 (q16).
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

/// Separable Gaussian blur on premultiplied RGBA8 with edge clamping.
pub(crate) fn blur_rgba8_premul_q16(
    src: &[u8],
    dst: &mut [u8],
    tmp: &mut [u8],
    width: u32,
    height: u32,
    kernel_q16: &[u32],
) {
    if kernel_q16.len() == 1 {
        dst.copy_from_slice(src);
        return;
    }
    horizontal_blur_q16(src, tmp, width, height, kernel_q16);
    vertical_blur_q16(tmp, dst, width, height, kernel_q16);
}

fn horizontal_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
