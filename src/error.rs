//! Error types shared by the tracker and the integration layer.

use thiserror::Error;

/// A bounding box that violates the caller contract.
///
/// Raised at the boundary, before a batch ever reaches the matching loop.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidBoxError {
    #[error("box width must be non-negative, got {0}")]
    NegativeWidth(f32),
    #[error("box height must be non-negative, got {0}")]
    NegativeHeight(f32),
    #[error("box coordinates must be finite")]
    NonFinite,
}

/// Rejected tracker or pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("frame skip rate must be >= 1")]
    ZeroSkipRate,
    #[error("match threshold must be within [0.0, 1.0), got {0}")]
    ThresholdOutOfRange(f32),
    #[error("scale factor must be positive and finite, got {0}")]
    NonPositiveScale(f32),
}

/// Failure while running one frame through a [`TrackerPipeline`](crate::TrackerPipeline).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("detector failed: {0}")]
    Detector(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    InvalidBox(#[from] InvalidBoxError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
