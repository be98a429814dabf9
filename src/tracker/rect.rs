use ndarray::Array2;

use crate::error::InvalidBoxError;

/// Axis-aligned bounding box in frame-pixel coordinates.
///
/// Stored as TLWH: top-left corner plus width and height. A zero-area box is
/// legal and flows through every computation without faulting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    ///
    /// No validation happens here; use [`Rect::try_new`] for untrusted input.
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLWH values, rejecting negative or non-finite geometry.
    pub fn try_new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, InvalidBoxError> {
        let rect = Self::new(x, y, width, height);
        rect.validate()?;
        Ok(rect)
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Check the box invariant: finite coordinates, width >= 0, height >= 0.
    pub fn validate(&self) -> Result<(), InvalidBoxError> {
        if !(self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
        {
            return Err(InvalidBoxError::NonFinite);
        }
        if self.width < 0.0 {
            return Err(InvalidBoxError::NegativeWidth(self.width));
        }
        if self.height < 0.0 {
            return Err(InvalidBoxError::NegativeHeight(self.height));
        }
        Ok(())
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Map a box found on a downscaled frame back to full-frame coordinates.
    ///
    /// `factor` is the downscale applied before detection (0.5 = half size).
    #[inline]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x / factor,
            y: self.y / factor,
            width: self.width / factor,
            height: self.height / factor,
        }
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// Always within `[0.0, 1.0]`. Two zero-area boxes have an IoU of 0.0.
    /// Areas are accumulated in f64 so very large boxes do not overflow.
    pub fn iou(&self, other: &Rect) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter_width = (x2 - x1).max(0.0) as f64;
        let inter_height = (y2 - y1).max(0.0) as f64;
        let inter_area = inter_width * inter_height;

        let area_a = self.width as f64 * self.height as f64;
        let area_b = other.width as f64 * other.height as f64;
        let union_area = area_a + area_b - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

/// Overlap metric between two boxes. Same as [`Rect::iou`].
#[inline]
pub fn overlap(a: &Rect, b: &Rect) -> f32 {
    a.iou(b)
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_batch(boxes_a: &[Rect], boxes_b: &[Rect]) -> Array2<f32> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}
