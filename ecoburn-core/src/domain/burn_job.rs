//! Burn job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage::{Stage, derive_progress};
use super::status::BurnStatus;

/// Display name used when a job is recorded without a member
pub const WALK_IN_SUBJECT: &str = "Walk-in customer (non-member)";

/// One record of waste processed through a kiln
///
/// Structure shared between server (persists) and client (renders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnJob {
    pub id: Uuid,
    pub subject_name: String,
    pub weight_kg: f64,
    pub status: BurnStatus,
    pub kiln_name: Option<String>,
    pub burn_kind: BurnKind,
    pub amount_paid: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How the burn is paid for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnKind {
    /// Member on a subscription plan
    #[default]
    Subscription,
    /// Walk-in customer paying per burn
    OneTime,
}

impl BurnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BurnKind::Subscription => "subscription",
            BurnKind::OneTime => "one_time",
        }
    }
}

impl std::fmt::Display for BurnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BurnKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subscription" => Ok(BurnKind::Subscription),
            "one_time" => Ok(BurnKind::OneTime),
            other => Err(format!("unknown burn kind '{}'", other)),
        }
    }
}

impl BurnJob {
    /// Derived progress timeline for this job
    pub fn progress(&self) -> [Stage; 4] {
        derive_progress(self.status, self.created_at, self.updated_at)
    }

    /// Set a new status and stamp the change
    ///
    /// The stamp never goes below `created_at`. Setting the current status
    /// again still re-stamps.
    pub fn set_status(&mut self, status: BurnStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at.max(self.created_at);
    }

    /// Whether `created_at` falls inside `[start, end]`
    pub fn created_within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.created_at >= start && self.created_at <= end
    }
}
