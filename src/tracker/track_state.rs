/// Confirmation state of a tracked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Seen in too few consecutive rounds to be rendered
    #[default]
    Tentative,
    /// Survived enough consecutive rounds to be rendered
    Confirmed,
}

impl TrackState {
    /// Classify a persistence count against the confirmation bound.
    ///
    /// Confirmation needs a count strictly above `min_persistence`.
    pub fn from_count(count: u32, min_persistence: u32) -> Self {
        if count > min_persistence {
            Self::Confirmed
        } else {
            Self::Tentative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count_is_strict() {
        assert_eq!(TrackState::from_count(1, 2), TrackState::Tentative);
        assert_eq!(TrackState::from_count(2, 2), TrackState::Tentative);
        assert_eq!(TrackState::from_count(3, 2), TrackState::Confirmed);
    }
}
