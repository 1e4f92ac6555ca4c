//! Burn job DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::burn_job::{BurnJob, BurnKind, WALK_IN_SUBJECT};
use crate::domain::stage::Stage;
use crate::domain::status::BurnStatus;

/// Request to record a new burn job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBurnJob {
    /// Member name; blank or absent records a walk-in customer
    #[serde(default)]
    pub subject_name: Option<String>,
    pub weight_kg: f64,
    /// Initial status, `pending` when absent
    #[serde(default)]
    pub status: Option<BurnStatus>,
    #[serde(default)]
    pub kiln_name: Option<String>,
    #[serde(default)]
    pub burn_kind: BurnKind,
    #[serde(default)]
    pub amount_paid: Option<i64>,
}

impl CreateBurnJob {
    /// Subject name with the walk-in fallback applied
    pub fn resolved_subject_name(&self) -> String {
        match self.subject_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => WALK_IN_SUBJECT.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_weight(self.weight_kg)?;
        validate_amount(self.amount_paid)
    }

    /// Build the job record this request describes
    pub fn into_job(self, id: uuid::Uuid, now: DateTime<Utc>) -> BurnJob {
        BurnJob {
            id,
            subject_name: self.resolved_subject_name(),
            weight_kg: self.weight_kg,
            status: self.status.unwrap_or(BurnStatus::Pending),
            kiln_name: self.kiln_name,
            burn_kind: self.burn_kind,
            amount_paid: self.amount_paid,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a burn job; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBurnJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BurnStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kiln_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_kind: Option<BurnKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<i64>,
}

impl UpdateBurnJob {
    /// Patch that only changes the status
    pub fn status(status: BurnStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(weight) = self.weight_kg {
            validate_weight(weight)?;
        }
        if let Some(name) = &self.subject_name {
            if name.trim().is_empty() {
                return Err("subject_name cannot be blank".to_string());
            }
        }
        validate_amount(self.amount_paid)
    }

    /// Apply the patch to `job`, stamping `updated_at` when a status is present
    pub fn apply_to(&self, job: &mut BurnJob, at: DateTime<Utc>) {
        if let Some(name) = &self.subject_name {
            job.subject_name = name.trim().to_string();
        }
        if let Some(weight) = self.weight_kg {
            job.weight_kg = weight;
        }
        if let Some(kiln) = &self.kiln_name {
            job.kiln_name = Some(kiln.clone());
        }
        if let Some(kind) = self.burn_kind {
            job.burn_kind = kind;
        }
        if let Some(amount) = self.amount_paid {
            job.amount_paid = Some(amount);
        }
        if let Some(status) = self.status {
            job.set_status(status, at);
        }
    }
}

/// Burn job together with its derived progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnJobView {
    #[serde(flatten)]
    pub job: BurnJob,
    pub progress: Vec<Stage>,
}

impl From<BurnJob> for BurnJobView {
    fn from(job: BurnJob) -> Self {
        let progress = job.progress().to_vec();
        Self { job, progress }
    }
}

fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        return Err(format!(
            "weight_kg must be a non-negative number (got {})",
            weight_kg
        ));
    }
    Ok(())
}

fn validate_amount(amount_paid: Option<i64>) -> Result<(), String> {
    match amount_paid {
        Some(amount) if amount < 0 => Err(format!(
            "amount_paid cannot be negative (got {})",
            amount
        )),
        _ => Ok(()),
    }
}
