//! TrackerPipeline for combining detection with persistence tracking.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PipelineError};
use crate::tracker::{Rect, TrackRegistry, TrackerConfig};

use super::{DetectionSource, SamplingSchedule, rescale_detections};

/// Configuration for one [`TrackerPipeline`] session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    /// Run the detector on every Nth frame.
    pub frame_skip_rate: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            frame_skip_rate: 5,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tracker.validate()?;
        SamplingSchedule::new(self.frame_skip_rate)?;
        Ok(())
    }
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Frames passed through the pipeline
    pub frames: u64,
    /// Frames on which the detector ran
    pub sampling_rounds: u64,
    /// Largest rendered set seen so far
    pub max_rendered: usize,
}

/// A detection session: detector, tracked state and sampling schedule.
///
/// Frames go in one at a time. On sampling frames the detector runs and the
/// registry advances; on every other frame the previous rendered set is
/// returned unchanged so overlays do not flicker.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    registry: TrackRegistry,
    schedule: SamplingSchedule,
    frame_index: u64,
    stats: SessionStats,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new session with the given detector and configuration.
    pub fn new(detector: D, config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let schedule = SamplingSchedule::new(config.frame_skip_rate)?;
        let registry = TrackRegistry::new(config.tracker)?;
        Ok(Self::start(detector, registry, schedule))
    }

    /// Create a session that runs the detector on every frame with default tracking.
    pub fn every_frame(detector: D) -> Self {
        Self::start(
            detector,
            TrackRegistry::with_default_config(),
            SamplingSchedule::every_frame(),
        )
    }

    fn start(detector: D, registry: TrackRegistry, schedule: SamplingSchedule) -> Self {
        let tracker = registry.config();
        log::info!(
            "tracking session started: detection every {} frame(s), match iou > {}, render after {} rounds",
            schedule.frame_skip_rate(),
            tracker.match_threshold,
            tracker.min_persistence
        );
        Self {
            detector,
            registry,
            schedule,
            frame_index: 0,
            stats: SessionStats::default(),
        }
    }

    /// Process a single frame and return the boxes to draw on it.
    ///
    /// If detection fails the frame is not counted, so the next call retries
    /// the same sampling slot.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<&[Rect], PipelineError> {
        if self.schedule.is_sampling_frame(self.frame_index) {
            let raw = self
                .detector
                .detect(input, width, height)
                .map_err(|e| PipelineError::Detector(Box::new(e)))?;
            let detections = rescale_detections(&raw, self.detector.scale_factor())?;
            self.registry.update(&detections)?;
            self.stats.sampling_rounds += 1;
        } else {
            log::trace!("frame {}: reusing previous rendered set", self.frame_index);
        }

        self.frame_index += 1;
        self.stats.frames += 1;
        self.stats.max_rendered = self.stats.max_rendered.max(self.registry.rendered().len());

        Ok(self.registry.rendered())
    }

    /// Boxes to draw until the next sampling round.
    pub fn rendered(&self) -> &[Rect] {
        self.registry.rendered()
    }

    /// Index of the next frame to be processed.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying registry.
    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// End the session and hand back the detector.
    pub fn finish(self) -> (D, SessionStats) {
        log::info!(
            "tracking session finished: {} frames, {} sampling rounds",
            self.stats.frames,
            self.stats.sampling_rounds
        );
        (self.detector, self.stats)
    }
}
