//! Association of new detections with the previous round's entries.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// How detections are paired with previous entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Each detection, in detector order, claims the first previous entry
    /// whose IoU exceeds the threshold. Several detections may claim the
    /// same entry.
    #[default]
    FirstMatch,
    /// One-to-one assignment maximising total IoU, solved with LAPJV.
    /// Pairs at or below the threshold are left unmatched.
    Optimal,
}

/// Pair every detection (row) with at most one entry (column).
///
/// `ious` has shape (detections, entries). Returns one slot per detection.
pub fn match_detections(ious: &Array2<f32>, thresh: f32, policy: MatchPolicy) -> Vec<Option<usize>> {
    match policy {
        MatchPolicy::FirstMatch => first_match(ious, thresh),
        MatchPolicy::Optimal => optimal_match(ious, thresh),
    }
}

/// Greedy scan: for each row, the lowest column index with IoU strictly above `thresh`.
pub fn first_match(ious: &Array2<f32>, thresh: f32) -> Vec<Option<usize>> {
    ious.rows()
        .into_iter()
        .map(|row| row.iter().position(|&iou| iou > thresh))
        .collect()
}

/// Solve the rectangular assignment on `1 - iou` costs.
pub fn optimal_match(ious: &Array2<f32>, thresh: f32) -> Vec<Option<usize>> {
    let (num_rows, num_cols) = ious.dim();

    if num_rows == 0 || num_cols == 0 {
        return vec![None; num_rows];
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for i in 0..num_rows {
        for j in 0..num_cols {
            padded[[i, j]] = 1.0 - ious[[i, j]] as f64;
        }
    }

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => row_to_col
            .into_iter()
            .take(num_rows)
            .enumerate()
            .map(|(row, col)| (col < num_cols && ious[[row, col]] > thresh).then_some(col))
            .collect(),
        Err(err) => {
            log::warn!("assignment solver failed ({err:?}), falling back to first match");
            first_match(ious, thresh)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_first_match_takes_lowest_index_not_best() {
        let ious = array![[0.3, 0.9]];
        assert_eq!(first_match(&ious, 0.2), vec![Some(0)]);
    }

    #[test]
    fn test_first_match_threshold_is_strict() {
        let ious = array![[0.2, 0.1], [0.21, 0.0]];
        assert_eq!(first_match(&ious, 0.2), vec![None, Some(0)]);
    }

    #[test]
    fn test_first_match_allows_duplicate_claims() {
        let ious = array![[0.5, 0.0], [0.6, 0.0]];
        assert_eq!(first_match(&ious, 0.2), vec![Some(0), Some(0)]);
    }

    #[test]
    fn test_first_match_without_entries() {
        let ious = Array2::<f32>::zeros((3, 0));
        assert_eq!(first_match(&ious, 0.2), vec![None, None, None]);
    }

    #[test]
    fn test_optimal_match_is_one_to_one() {
        let ious = array![[0.5, 0.0], [0.6, 0.0]];
        assert_eq!(optimal_match(&ious, 0.2), vec![None, Some(0)]);
    }

    #[test]
    fn test_optimal_match_prefers_total_overlap() {
        // Greedy lets both rows claim column 0; the assignment splits them.
        let ious = array![[0.4, 0.8], [0.7, 0.0]];
        assert_eq!(first_match(&ious, 0.2), vec![Some(0), Some(0)]);
        assert_eq!(optimal_match(&ious, 0.2), vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_optimal_match_rejects_below_threshold() {
        let ious = array![[0.1], [0.0]];
        assert_eq!(optimal_match(&ious, 0.2), vec![None, None]);
    }

    #[test]
    fn test_optimal_match_more_entries_than_detections() {
        let ious = array![[0.0, 0.0, 0.9]];
        assert_eq!(optimal_match(&ious, 0.2), vec![Some(2)]);
    }

    #[test]
    fn test_match_detections_dispatches_on_policy() {
        let ious = array![[0.5], [0.6]];
        assert_eq!(
            match_detections(&ious, 0.2, MatchPolicy::FirstMatch),
            vec![Some(0), Some(0)]
        );
        assert_eq!(
            match_detections(&ious, 0.2, MatchPolicy::Optimal),
            vec![None, Some(0)]
        );
    }
}
