//! Round-by-round persistence tracking.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InvalidBoxError};
use crate::tracker::matching::{self, MatchPolicy};
use crate::tracker::rect::{Rect, iou_batch};
use crate::tracker::tracked_entry::TrackedEntry;

/// Configuration for the [`TrackRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// IoU that must be strictly exceeded for a detection to continue an entry.
    pub match_threshold: f32,
    /// Entries are rendered once their count is strictly above this.
    pub min_persistence: u32,
    pub policy: MatchPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.2,
            min_persistence: 2,
            policy: MatchPolicy::FirstMatch,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.match_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.match_threshold));
        }
        Ok(())
    }
}

/// Advance the tracked state by one sampling round.
///
/// The next state holds exactly one entry per detection, in detection order.
/// Previous entries nobody matched are dropped. Inputs are assumed valid.
pub fn advance(
    previous: &[TrackedEntry],
    detections: &[Rect],
    config: &TrackerConfig,
) -> Vec<TrackedEntry> {
    let prev_rects: Vec<Rect> = previous.iter().map(|e| e.rect).collect();
    let ious = iou_batch(detections, &prev_rects);
    let matches = matching::match_detections(&ious, config.match_threshold, config.policy);

    detections
        .iter()
        .zip(matches)
        .enumerate()
        .map(|(idet, (det, matched))| match matched {
            Some(ientry) => {
                log::trace!(
                    "detection {idet} continues entry {ientry} (iou {:.3})",
                    ious[[idet, ientry]]
                );
                previous[ientry].matched(*det)
            }
            None => {
                log::trace!("detection {idet} starts a new entry");
                TrackedEntry::new(*det)
            }
        })
        .collect()
}

/// Boxes of the entries confirmed under `config`, in state order.
pub fn confirmed(entries: &[TrackedEntry], config: &TrackerConfig) -> Vec<Rect> {
    entries
        .iter()
        .filter(|e| e.is_confirmed(config.min_persistence))
        .map(|e| e.rect)
        .collect()
}

/// Tracked state of one detection session.
///
/// Created once per stream and fed one batch per sampling round. Between
/// rounds the last rendered set stays available through [`TrackRegistry::rendered`].
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    entries: Vec<TrackedEntry>,
    rendered: Vec<Rect>,
    round: u64,
    config: TrackerConfig,
}

impl TrackRegistry {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::unchecked(config))
    }

    pub fn with_default_config() -> Self {
        Self::unchecked(TrackerConfig::default())
    }

    fn unchecked(config: TrackerConfig) -> Self {
        Self {
            entries: Vec::new(),
            rendered: Vec::new(),
            round: 0,
            config,
        }
    }

    /// Run one sampling round and return the boxes to render until the next one.
    ///
    /// The whole batch is validated first; on error the state is unchanged.
    pub fn update(&mut self, detections: &[Rect]) -> Result<Vec<Rect>, InvalidBoxError> {
        for det in detections {
            det.validate()?;
        }

        self.entries = advance(&self.entries, detections, &self.config);
        self.rendered = confirmed(&self.entries, &self.config);
        self.round += 1;

        log::debug!(
            "round {}: {} detections, {} rendered",
            self.round,
            detections.len(),
            self.rendered.len()
        );

        Ok(self.rendered.clone())
    }

    /// Entries alive after the latest round.
    pub fn entries(&self) -> &[TrackedEntry] {
        &self.entries
    }

    /// Rendered set computed by the latest round.
    pub fn rendered(&self) -> &[Rect] {
        &self.rendered
    }

    /// Number of rounds processed since creation or the last reset.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Forget all entries, e.g. when the stream restarts.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.rendered.clear();
        self.round = 0;
    }
}
