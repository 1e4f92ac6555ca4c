//! Progress stages
//!
//! A burn job stores a single status value. The four-step progress timeline
//! shown to operators is derived from that status and the job's two
//! timestamps every time it is read; stages are never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::BurnStatus;

/// One of the four fixed lifecycle steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageLabel {
    Submission,
    Preparation,
    Burning,
    Completion,
}

impl StageLabel {
    /// All labels in display order
    pub const ALL: [StageLabel; 4] = [
        StageLabel::Submission,
        StageLabel::Preparation,
        StageLabel::Burning,
        StageLabel::Completion,
    ];
}

impl std::fmt::Display for StageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageLabel::Submission => write!(f, "Submission"),
            StageLabel::Preparation => write!(f, "Preparation"),
            StageLabel::Burning => write!(f, "Burning"),
            StageLabel::Completion => write!(f, "Completion"),
        }
    }
}

/// A derived progress step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub label: StageLabel,
    pub completed: bool,
    /// Only set on completed stages
    pub timestamp: Option<DateTime<Utc>>,
}

impl Stage {
    fn done(label: StageLabel, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            label,
            completed: true,
            timestamp,
        }
    }

    fn open(label: StageLabel) -> Self {
        Self {
            label,
            completed: false,
            timestamp: None,
        }
    }
}

/// Derive the four progress stages of a burn job
///
/// - Submission is always complete and stamped with `created_at`.
/// - `Processing` completes Preparation (stamped `updated_at`) and Burning
///   (burning counts as active once processing starts, no stamp).
/// - `Completed` completes every stage; only Completion is stamped, with `updated_at`.
///
/// Timestamps are propagated as given, even if `updated_at < created_at`.
pub fn derive_progress(
    status: BurnStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> [Stage; 4] {
    let submission = Stage::done(StageLabel::Submission, Some(created_at));

    match status {
        BurnStatus::Pending => [
            submission,
            Stage::open(StageLabel::Preparation),
            Stage::open(StageLabel::Burning),
            Stage::open(StageLabel::Completion),
        ],
        BurnStatus::Processing => [
            submission,
            Stage::done(StageLabel::Preparation, Some(updated_at)),
            Stage::done(StageLabel::Burning, None),
            Stage::open(StageLabel::Completion),
        ],
        BurnStatus::Completed => [
            submission,
            Stage::done(StageLabel::Preparation, None),
            Stage::done(StageLabel::Burning, None),
            Stage::done(StageLabel::Completion, Some(updated_at)),
        ],
    }
}

/// Fill ratio of a progress bar drawn between the first and last stage
///
/// 0.0 when only Submission is complete, 1.0 when every stage is.
pub fn completed_fraction(stages: &[Stage]) -> f64 {
    if stages.len() < 2 {
        return 0.0;
    }
    let done = stages.iter().filter(|s| s.completed).count();
    done.saturating_sub(1) as f64 / (stages.len() - 1) as f64
}
