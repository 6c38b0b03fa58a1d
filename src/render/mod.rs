//! CPU rasterization of [`ResolvedScene`](crate::scene::ResolvedScene)s.
//!
//! The renderer draws onto a surface of any size: the same scene is rendered at the on-screen
//! preview size or at the fixed export capture size.

mod cpu;
mod icons;
pub(crate) mod raster;
mod text;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::content::{ImageRef, ImageSlot};
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

pub use cpu::CpuRenderer;
pub use text::{LoadedFont, MissingFontPolicy, load_font};

/// Provides the encoded bytes behind image handles.
pub trait ImageSource {
    fn fetch(&self, image: ImageRef) -> StudioResult<Arc<[u8]>>;
}

impl ImageSource for ImageSlot {
    fn fetch(&self, image: ImageRef) -> StudioResult<Arc<[u8]>> {
        self.bytes(image)
    }
}

impl ImageSource for BTreeMap<ImageRef, Arc<[u8]>> {
    fn fetch(&self, image: ImageRef) -> StudioResult<Arc<[u8]>> {
        self.get(&image)
            .cloned()
            .ok_or_else(|| StudioError::not_found("image", image.0.to_string()))
    }
}

/// Rendered pixels, row-major premultiplied RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RenderedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RenderedImage {
    pub(crate) fn new(width: u32, height: u32, data: Vec<u8>) -> StudioResult<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(StudioError::render("rendered buffer size mismatch"));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn premul_rgba8(&self) -> &[u8] {
        &self.data
    }

    /// Straight-alpha RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let mut px = [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ];
        unpremultiply_rgba8_in_place(&mut px);
        Some(px)
    }

    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    pub fn encode_png(&self) -> StudioResult<Vec<u8>> {
        use image::ImageEncoder;

        let rgba = self.to_straight_rgba8();
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &rgba,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| StudioError::render(format!("png encode failed: {e}")))?;
        Ok(out)
    }
}
