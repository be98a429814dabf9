//! Builder for turning raw detector output into validated boxes.

use crate::error::{ConfigError, InvalidBoxError};
use crate::tracker::Rect;

/// Builder for creating validated [`Rect`]s from various detector output formats.
///
/// Coordinates given to the builder are in the space of the frame the
/// detector ran on; [`DetectionBuilder::downscale`] maps them back to the
/// full frame.
#[derive(Debug, Clone)]
pub struct DetectionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    scale: f32,
}

impl Default for DetectionBuilder {
    fn default() -> Self {
        Self {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
            scale: 1.0,
        }
    }
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    /// Downscale factor the frame was resized by before detection.
    ///
    /// The factor must be positive and finite.
    pub fn downscale(mut self, factor: f32) -> Result<Self, ConfigError> {
        check_scale(factor)?;
        self.scale = factor;
        Ok(self)
    }

    /// Build the final full-frame [`Rect`], rejecting invalid geometry.
    pub fn build(self) -> Result<Rect, InvalidBoxError> {
        let rect = Rect::from_tlbr(self.x1, self.y1, self.x2, self.y2).scaled(self.scale);
        rect.validate()?;
        Ok(rect)
    }
}

/// Downscale factor that brings a frame to at most `target_width` pixels wide.
///
/// Frames already narrower than the target are left at full size.
pub fn detection_scale_factor(frame_width: u32, target_width: u32) -> f32 {
    if frame_width == 0 {
        return 1.0;
    }
    (target_width as f32 / frame_width as f32).min(1.0)
}

/// Map a batch of boxes from a downscaled frame back to full-frame coordinates.
pub fn rescale_detections(boxes: &[Rect], factor: f32) -> Result<Vec<Rect>, ConfigError> {
    check_scale(factor)?;
    if factor == 1.0 {
        return Ok(boxes.to_vec());
    }
    Ok(boxes.iter().map(|b| b.scaled(factor)).collect())
}

fn check_scale(factor: f32) -> Result<(), ConfigError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveScale(factor))
    }
}
