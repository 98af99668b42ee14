//! Save-integrity rules for the two keypoint lists
//!
//! Keypoints are paired implicitly by list index, so the only structural
//! constraint is that both lists have the same length at save time. Counts
//! may drift apart freely while picking.

use thiserror::Error;

use super::Side;

/// Why a coordinator action was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrespondenceError {
    #[error("keypoint counts differ: {image} image vs {cloud} cloud")]
    CountMismatch { image: usize, cloud: usize },
    #[error("no {} loaded yet", .0.label())]
    PrereqMissing(Side),
}

/// Check the equal-count invariant before a save. Equal counts are saveable,
/// zero included (an empty pair of files is a vacuous success).
pub fn ensure_saveable(image: usize, cloud: usize) -> Result<(), CorrespondenceError> {
    if image != cloud {
        return Err(CorrespondenceError::CountMismatch { image, cloud });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_counts_are_saveable() {
        assert!(ensure_saveable(2, 2).is_ok());
        assert!(ensure_saveable(0, 0).is_ok());
    }

    #[test]
    fn mismatched_counts_are_rejected_with_both_counts() {
        assert_eq!(
            ensure_saveable(1, 0),
            Err(CorrespondenceError::CountMismatch { image: 1, cloud: 0 })
        );
        assert_eq!(
            ensure_saveable(3, 5),
            Err(CorrespondenceError::CountMismatch { image: 3, cloud: 5 })
        );
    }
}
