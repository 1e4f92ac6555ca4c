//! Burn report summary

use serde::{Deserialize, Serialize};

use crate::domain::burn_job::BurnJob;
use crate::domain::status::BurnStatus;

/// Totals shown at the top of the burn report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BurnSummary {
    pub job_count: usize,
    pub total_weight_kg: f64,
    pub pending_count: usize,
    pub processing_count: usize,
    pub completed_count: usize,
}

impl BurnSummary {
    pub fn from_jobs<'a>(jobs: impl IntoIterator<Item = &'a BurnJob>) -> Self {
        jobs.into_iter().fold(Self::default(), |mut acc, job| {
            acc.job_count += 1;
            acc.total_weight_kg += job.weight_kg;
            match job.status {
                BurnStatus::Pending => acc.pending_count += 1,
                BurnStatus::Processing => acc.processing_count += 1,
                BurnStatus::Completed => acc.completed_count += 1,
            }
            acc
        })
    }
}
