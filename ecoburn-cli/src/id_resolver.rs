//! ID resolver module
//!
//! Resolves burn job ID prefixes to full UUIDs by listing jobs from the API,
//! so operators can type a short prefix instead of a full UUID.

use anyhow::{Context, Result, anyhow};
use ecoburn_client::EcoBurnClient;
use uuid::Uuid;

use crate::types::IdOrPrefix;

/// Resolve a burn job ID or prefix to a full UUID
///
/// A full UUID is returned immediately without a request.
///
/// # Errors
/// Returns an error if:
/// - No burn job matches the prefix
/// - Multiple burn jobs match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_burn_job_id(client: &EcoBurnClient, id_or_prefix: &IdOrPrefix) -> Result<Uuid> {
    if let Some(uuid) = id_or_prefix.as_uuid() {
        return Ok(uuid);
    }

    let jobs = client
        .list_burn_jobs()
        .await
        .context("Failed to fetch burn jobs for ID resolution")?;

    pick_unique(id_or_prefix, jobs.iter().map(|view| view.job.id))
}

/// Pick the single id matched by `id_or_prefix`
fn pick_unique(id_or_prefix: &IdOrPrefix, ids: impl Iterator<Item = Uuid>) -> Result<Uuid> {
    let matches: Vec<Uuid> = ids.filter(|id| id_or_prefix.matches(id)).collect();

    match matches.as_slice() {
        [] => Err(anyhow!(
            "No burn job found with ID starting with '{}'",
            id_or_prefix
        )),
        [id] => Ok(*id),
        _ => {
            let ids: Vec<String> = matches.iter().map(Uuid::to_string).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple burn jobs: {}",
                id_or_prefix,
                ids.join(", ")
            ))
        }
    }
}
