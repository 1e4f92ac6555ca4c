//! Burn job status model

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a burn job
///
/// Ordered by lifecycle rank: a greater status is further along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnStatus {
    /// Submitted, waiting for a kiln
    Pending,
    /// Being prepared or burned
    #[serde(alias = "proses")]
    Processing,
    /// Burn finished
    #[serde(alias = "selesai")]
    Completed,
}

impl BurnStatus {
    /// All statuses in lifecycle order
    pub const ORDERED: [BurnStatus; 3] = [
        BurnStatus::Pending,
        BurnStatus::Processing,
        BurnStatus::Completed,
    ];

    /// Position of this status in the lifecycle (0-based)
    pub fn rank(self) -> usize {
        match self {
            BurnStatus::Pending => 0,
            BurnStatus::Processing => 1,
            BurnStatus::Completed => 2,
        }
    }

    /// Whether `self` is at least as advanced as `other`
    pub fn is_at_least(self, other: BurnStatus) -> bool {
        self.rank() >= other.rank()
    }

    /// Canonical wire name
    pub fn as_str(self) -> &'static str {
        match self {
            BurnStatus::Pending => "pending",
            BurnStatus::Processing => "processing",
            BurnStatus::Completed => "completed",
        }
    }
}

impl PartialOrd for BurnStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BurnStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for BurnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown burn status '{0}' (expected pending, processing or completed)")]
pub struct UnknownStatus(pub String);

impl FromStr for BurnStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BurnStatus::Pending),
            "processing" | "proses" => Ok(BurnStatus::Processing),
            "completed" | "selesai" => Ok(BurnStatus::Completed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Which status reassignments are allowed at the update boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPolicy {
    /// Any status may be set from any other status
    #[default]
    Permissive,
    /// A status may only stay the same or move forward in the lifecycle
    ForwardOnly,
}

impl TransitionPolicy {
    /// Check whether moving from `from` to `to` is allowed
    pub fn allows(self, from: BurnStatus, to: BurnStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::ForwardOnly => to.is_at_least(from),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "forward-only" | "forward_only" => Ok(TransitionPolicy::ForwardOnly),
            other => Err(format!("unknown transition policy '{}'", other)),
        }
    }
}
