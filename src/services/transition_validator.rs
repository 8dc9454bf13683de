//! Section-move rules between the four status lanes.

use crate::domain::errors::{DenialReason, TransitionDenied};
use crate::domain::models::{Ratings, TaskStatus};

/// Whether a task may move from `current` to `target`.
///
/// Moving to the lane a task is already in is a no-op and always allowed.
pub fn can_transition(current: TaskStatus, target: TaskStatus, has_all_ratings: bool) -> bool {
    use TaskStatus::{Completed, Parked, Rated, Unrated};

    match (current, target) {
        (Unrated, Unrated) | (Rated, Rated) | (Parked, Parked) | (Completed, Completed) => true,
        (_, Parked | Completed) | (Completed, Rated) => true,
        (Unrated | Parked, Rated) => has_all_ratings,
        (Rated, Unrated) => false,
        (Parked | Completed, Unrated) => !has_all_ratings,
    }
}

/// Like [`can_transition`], but says why a move is refused.
pub fn check_transition(
    current: TaskStatus,
    target: TaskStatus,
    ratings: &Ratings,
) -> Result<(), TransitionDenied> {
    if can_transition(current, target, ratings.is_complete()) {
        return Ok(());
    }

    let reason = match (current, target) {
        (TaskStatus::Rated, TaskStatus::Unrated) => DenialReason::Forbidden,
        (_, TaskStatus::Rated) => DenialReason::MissingRatings {
            missing: ratings.missing(),
        },
        _ => DenialReason::RatingsLocked,
    };

    Err(TransitionDenied {
        from: current,
        to: target,
        reason,
    })
}

/// Lane a parked or completed task goes back to when reopened.
pub fn restore_target(has_all_ratings: bool) -> TaskStatus {
    if has_all_ratings {
        TaskStatus::Rated
    } else {
        TaskStatus::Unrated
    }
}
