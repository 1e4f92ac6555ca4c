use anyhow::Result;
use colored::*;

use crate::config::Config;

/// Print the burn report totals
pub async fn show_summary(config: &Config) -> Result<()> {
    let summary = config.client().summary().await?;

    println!("{}", "Burn Report:".bold());
    println!("  Jobs:        {}", summary.job_count);
    println!("  Total waste: {:.1} kg", summary.total_weight_kg);
    println!("  Pending:     {}", summary.pending_count.to_string().yellow());
    println!("  Processing:  {}", summary.processing_count.to_string().cyan());
    println!("  Completed:   {}", summary.completed_count.to_string().green());

    Ok(())
}
