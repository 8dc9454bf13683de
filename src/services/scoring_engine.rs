use crate::domain::models::{Ratings, Task, TaskStatus};

/// Score and status produced for one set of ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub score: Option<f64>,
    pub status: TaskStatus,
}

/// Derives a task's score from its ratings and keeps the
/// unrated/rated lane in step with rating completeness.
///
/// Score formula: impact * 0.5 + simplicity * 0.3 + energy * 0.2
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    impact_weight: f64,
    simplicity_weight: f64,
    energy_weight: f64,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    /// Create an engine with the standard weights
    pub fn new() -> Self {
        Self {
            impact_weight: 0.5,
            simplicity_weight: 0.3,
            energy_weight: 0.2,
        }
    }

    /// Create an engine with custom weights
    pub fn with_weights(impact_weight: f64, simplicity_weight: f64, energy_weight: f64) -> Self {
        Self {
            impact_weight,
            simplicity_weight,
            energy_weight,
        }
    }

    /// Weighted score, rounded to two decimals. `None` unless all three ratings are present.
    pub fn score(&self, ratings: &Ratings) -> Option<f64> {
        let (energy, simplicity, impact) = ratings.complete()?;
        let raw = f64::from(impact) * self.impact_weight
            + f64::from(simplicity) * self.simplicity_weight
            + f64::from(energy) * self.energy_weight;
        Some(round_to_cents(raw))
    }

    /// Compute score and lane for the given ratings and current status.
    ///
    /// Complete ratings promote `unrated` to `rated`; incomplete ratings
    /// demote `rated` to `unrated`. Parked and completed are left alone.
    pub fn evaluate(&self, ratings: &Ratings, status: TaskStatus) -> ScoreOutcome {
        match self.score(ratings) {
            Some(score) => ScoreOutcome {
                score: Some(score),
                status: if status == TaskStatus::Unrated {
                    TaskStatus::Rated
                } else {
                    status
                },
            },
            None => ScoreOutcome {
                score: None,
                status: if status == TaskStatus::Rated {
                    TaskStatus::Unrated
                } else {
                    status
                },
            },
        }
    }

    /// Run the engine on a task before it is saved. Subtasks are never scored.
    ///
    /// Returns true when score or status changed.
    pub fn apply(&self, task: &mut Task) -> bool {
        let before = (task.score, task.status);

        if task.is_subtask() {
            task.score = None;
        } else {
            let outcome = self.evaluate(&task.ratings(), task.status);
            task.score = outcome.score;
            task.status = outcome.status;
        }

        before != (task.score, task.status)
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
