use crate::error::ConfigError;

/// Decides on which frames the detector runs.
///
/// Frame `i` is a sampling frame when `i % frame_skip_rate == 0`, so frame 0
/// is always sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingSchedule {
    frame_skip_rate: u32,
}

impl SamplingSchedule {
    pub fn new(frame_skip_rate: u32) -> Result<Self, ConfigError> {
        if frame_skip_rate == 0 {
            return Err(ConfigError::ZeroSkipRate);
        }
        Ok(Self { frame_skip_rate })
    }

    /// Run the detector on every frame.
    pub fn every_frame() -> Self {
        Self { frame_skip_rate: 1 }
    }

    pub fn frame_skip_rate(&self) -> u32 {
        self.frame_skip_rate
    }

    pub fn is_sampling_frame(&self, frame_index: u64) -> bool {
        frame_index % u64::from(self.frame_skip_rate) == 0
    }
}
