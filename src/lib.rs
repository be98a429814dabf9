//! Persistence-count tracking for noisy per-frame face detections.
//!
//! A detector sampled every Nth frame yields boxes that jitter, vanish and
//! reappear. The [`TrackRegistry`] matches each new batch against the previous
//! round by IoU, counts how many consecutive rounds every box has survived and
//! only reports boxes that have been confirmed across several rounds.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{ConfigError, InvalidBoxError, PipelineError};
pub use integration::{
    DetectionBuilder, DetectionSource, PipelineConfig, SamplingSchedule, SessionStats,
    TrackerPipeline, detection_scale_factor, rescale_detections,
};
pub use tracker::{
    MatchPolicy, Rect, TrackRegistry, TrackState, TrackedEntry, TrackerConfig, advance,
    confirmed, overlap,
};
