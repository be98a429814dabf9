mod matching;
mod rect;
mod registry;
mod track_state;
mod tracked_entry;

pub use matching::{MatchPolicy, first_match, match_detections, optimal_match};
pub use rect::{Rect, iou_batch, overlap};
pub use registry::{TrackRegistry, TrackerConfig, advance, confirmed};
pub use track_state::TrackState;
pub use tracked_entry::TrackedEntry;
