//! Trait for face detection backends.

use crate::tracker::Rect;

/// Trait for face detection backends.
///
/// Implement this trait to feed any detector into a
/// [`TrackerPipeline`](crate::TrackerPipeline).
///
/// # Example
///
/// ```
/// use facetrack_rs::{DetectionSource, Rect};
///
/// struct FixedDetector;
///
/// impl DetectionSource for FixedDetector {
///     type Error = std::convert::Infallible;
///
///     fn detect(&mut self, _input: &[u8], _width: u32, _height: u32) -> Result<Vec<Rect>, Self::Error> {
///         Ok(vec![Rect::new(10.0, 10.0, 40.0, 40.0)])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run detection on one frame.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// Raw boxes in the coordinate space of the frame the detector actually
    /// ran on. See [`DetectionSource::scale_factor`].
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Rect>, Self::Error>;

    /// Downscale factor applied to the frame before detection.
    ///
    /// Boxes from [`DetectionSource::detect`] are divided by this to get back
    /// to full-frame coordinates. `1.0` means the detector ran at full size.
    fn scale_factor(&self) -> f32 {
        1.0
    }
}
