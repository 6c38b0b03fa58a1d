use crate::foundation::error::{StudioError, StudioResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Logical edge length of the square post format.
pub const FORMAT_SIZE: u32 = 1080;
/// Device-pixel density used for every export capture.
pub const EXPORT_PIXEL_RATIO: u32 = 2;
/// Fixed file name of the exported asset.
pub const EXPORT_FILE_NAME: &str = "facebook-post.png";

/// Largest surface edge the CPU rasterizer accepts (`vello_cpu` surfaces are `u16`-sized).
pub const MAX_SURFACE_PX: u32 = u16::MAX as u32;

/// Logical canvas dimensions, the coordinate space every scene region is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// The 1080×1080 square post.
    pub const FORMAT: Self = Self {
        width: FORMAT_SIZE,
        height: FORMAT_SIZE,
    };

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Pixel dimensions of a raster surface a scene is drawn onto.
///
/// A target is either a capture (`canvas × pixel_ratio`, used by export) or a viewport (whatever
/// size the shell currently displays the preview at). Scenes are scaled to fill the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterTarget {
    pub width: u32,
    pub height: u32,
}

impl RasterTarget {
    /// Fixed-resolution capture target, independent of any on-screen size.
    pub fn capture(canvas: Canvas, pixel_ratio: u32) -> StudioResult<Self> {
        if pixel_ratio == 0 {
            return Err(StudioError::validation("pixel ratio must be > 0"));
        }
        Self::viewport(
            canvas.width.saturating_mul(pixel_ratio),
            canvas.height.saturating_mul(pixel_ratio),
        )
    }

    pub fn viewport(width: u32, height: u32) -> StudioResult<Self> {
        if width == 0 || height == 0 {
            return Err(StudioError::validation("raster target must be non-empty"));
        }
        if width > MAX_SURFACE_PX || height > MAX_SURFACE_PX {
            return Err(StudioError::validation(format!(
                "raster target {width}x{height} exceeds {MAX_SURFACE_PX}px"
            )));
        }
        Ok(Self { width, height })
    }

    /// Transform mapping logical canvas coordinates onto this target's pixels.
    pub fn transform_from(self, canvas: Canvas) -> Affine {
        Affine::scale_non_uniform(
            f64::from(self.width) / f64::from(canvas.width.max(1)),
            f64::from(self.height) / f64::from(canvas.height.max(1)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
