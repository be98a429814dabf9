//! Caller-side plumbing between an external face detector and the tracker.
//!
//! The tracker itself never touches frames. This module provides the
//! detector contract, boundary validation and rescaling of raw boxes, the
//! sampling schedule, and a [`TrackerPipeline`] that ties them together for
//! one stream.

mod builder;
mod detector;
mod pipeline;
mod schedule;

pub use builder::{DetectionBuilder, detection_scale_factor, rescale_detections};
pub use detector::DetectionSource;
pub use pipeline::{PipelineConfig, SessionStats, TrackerPipeline};
pub use schedule::SamplingSchedule;
