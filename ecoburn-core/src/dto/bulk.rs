//! Bulk status transition DTOs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::status::BurnStatus;

/// Why a bulk transition range was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range start and end must both be provided")]
    MissingBound,

    #[error("range start {start} is after range end {end}")]
    Inverted {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("could not parse {field} '{value}'")]
    Unparseable { field: &'static str, value: String },
}

/// Apply one status to every job created inside an inclusive time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkTransitionRequest {
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
    pub target_status: BurnStatus,
}

impl BulkTransitionRequest {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, target_status: BurnStatus) -> Self {
        Self {
            range_start: Some(start),
            range_end: Some(end),
            target_status,
        }
    }

    /// Both bounds, checked to be present and ordered
    pub fn validated_range(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), RangeError> {
        match (self.range_start, self.range_end) {
            (Some(start), Some(end)) if start <= end => Ok((start, end)),
            (Some(start), Some(end)) => Err(RangeError::Inverted { start, end }),
            _ => Err(RangeError::MissingBound),
        }
    }
}

/// Wire shape of the bulk update form: separate date and time inputs
///
/// Dates are `YYYY-MM-DD`, times `HH:MM` or `HH:MM:SS`, all read as UTC.
/// The target `status` is required on the wire; only [`Default`] presets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkTransitionForm {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: BurnStatus,
}

impl Default for BulkTransitionForm {
    fn default() -> Self {
        Self {
            start_date: None,
            start_time: None,
            end_date: None,
            end_time: None,
            status: BurnStatus::Completed,
        }
    }
}

impl BulkTransitionForm {
    pub fn new(
        start_date: impl Into<String>,
        start_time: impl Into<String>,
        end_date: impl Into<String>,
        end_time: impl Into<String>,
        status: BurnStatus,
    ) -> Self {
        Self {
            start_date: Some(start_date.into()),
            start_time: Some(start_time.into()),
            end_date: Some(end_date.into()),
            end_time: Some(end_time.into()),
            status,
        }
    }

    /// Combine the date/time inputs into a request
    ///
    /// A missing or blank input leaves its bound empty (the engine rejects
    /// that later); an input that is present but malformed fails here.
    pub fn into_request(self) -> Result<BulkTransitionRequest, RangeError> {
        let range_start = combine(
            self.start_date.as_deref(),
            self.start_time.as_deref(),
            "start",
        )?;
        let range_end = combine(self.end_date.as_deref(), self.end_time.as_deref(), "end")?;

        Ok(BulkTransitionRequest {
            range_start,
            range_end,
            target_status: self.status,
        })
    }
}

fn combine(
    date: Option<&str>,
    time: Option<&str>,
    bound: &'static str,
) -> Result<Option<DateTime<Utc>>, RangeError> {
    let date = date.map(str::trim).filter(|s| !s.is_empty());
    let time = time.map(str::trim).filter(|s| !s.is_empty());

    let (Some(date), Some(time)) = (date, time) else {
        return Ok(None);
    };

    let date_field = if bound == "start" { "start_date" } else { "end_date" };
    let time_field = if bound == "start" { "start_time" } else { "end_time" };

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        RangeError::Unparseable {
            field: date_field,
            value: date.to_string(),
        }
    })?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| RangeError::Unparseable {
            field: time_field,
            value: time.to_string(),
        })?;

    Ok(Some(NaiveDateTime::new(date, time).and_utc()))
}

/// Aggregate outcome of a bulk transition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTransitionReport {
    pub matched_count: usize,
    pub updated_count: usize,
    pub failed_ids: Vec<Uuid>,
}

impl BulkTransitionReport {
    /// Some matched rows could not be updated
    pub fn is_partial_failure(&self) -> bool {
        !self.failed_ids.is_empty()
    }
}

/// Body returned by the bulk update endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTransitionResponse {
    pub message: String,
    pub matched_count: usize,
    pub updated_count: usize,
    pub failed_ids: Vec<Uuid>,
}

impl BulkTransitionResponse {
    pub fn new(report: BulkTransitionReport, target_status: BurnStatus) -> Self {
        let message = if report.is_partial_failure() {
            format!(
                "Updated {} of {} burn job(s) to {}; {} failed",
                report.updated_count,
                report.matched_count,
                target_status,
                report.failed_ids.len()
            )
        } else {
            format!(
                "Updated {} burn job(s) to {}",
                report.updated_count, target_status
            )
        };

        Self {
            message,
            matched_count: report.matched_count,
            updated_count: report.updated_count,
            failed_ids: report.failed_ids,
        }
    }
}
