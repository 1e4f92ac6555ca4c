//! Burn job command handlers
//!
//! Handles listing, viewing, recording and updating burn jobs, including
//! bulk status transitions over a creation-time range.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use ecoburn_client::EcoBurnClient;
use ecoburn_core::domain::burn_job::{BurnJob, BurnKind};
use ecoburn_core::domain::stage::{Stage, completed_fraction};
use ecoburn_core::domain::status::BurnStatus;
use ecoburn_core::dto::bulk::BulkTransitionForm;
use ecoburn_core::dto::burn_job::{BurnJobView, CreateBurnJob};

use crate::config::Config;
use crate::id_resolver::resolve_burn_job_id;
use crate::types::IdOrPrefix;

/// Burn job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List all burn jobs
    List,
    /// Get burn job details and progress
    Get {
        /// Burn job ID or unambiguous prefix
        id: String,
    },
    /// Record a new burn job
    Create {
        /// Name of the member who brought the waste (walk-in if omitted)
        #[arg(long)]
        subject: Option<String>,

        /// Waste weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Initial status
        #[arg(long)]
        status: Option<BurnStatus>,

        /// Kiln that will burn the waste
        #[arg(long)]
        kiln: Option<String>,

        /// subscription or one_time
        #[arg(long, default_value = "subscription")]
        kind: BurnKind,

        /// Amount paid for a one-time burn
        #[arg(long)]
        amount_paid: Option<i64>,
    },
    /// Set the status of one burn job
    SetStatus {
        /// Burn job ID or unambiguous prefix
        id: String,

        /// pending, processing or completed
        status: BurnStatus,
    },
    /// Delete a burn job
    Delete {
        /// Burn job ID or unambiguous prefix
        id: String,
    },
    /// Set one status on every burn job created in a date/time range
    Bulk {
        /// Range start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,

        /// Range start time (HH:MM)
        #[arg(long, default_value = "00:00")]
        start_time: String,

        /// Range end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,

        /// Range end time (HH:MM)
        #[arg(long, default_value = "23:59:59")]
        end_time: String,

        /// Target status
        #[arg(long, default_value = "completed")]
        status: BurnStatus,
    },
}

/// Handle burn job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        JobCommands::List => list_jobs(&client).await,
        JobCommands::Get { id } => get_job(&client, &id).await,
        JobCommands::Create {
            subject,
            weight,
            status,
            kiln,
            kind,
            amount_paid,
        } => {
            let req = CreateBurnJob {
                subject_name: subject,
                weight_kg: weight,
                status,
                kiln_name: kiln,
                burn_kind: kind,
                amount_paid,
            };
            create_job(&client, req).await
        }
        JobCommands::SetStatus { id, status } => set_status(&client, &id, status).await,
        JobCommands::Delete { id } => delete_job(&client, &id).await,
        JobCommands::Bulk {
            start_date,
            start_time,
            end_date,
            end_time,
            status,
        } => {
            let form = BulkTransitionForm::new(start_date, start_time, end_date, end_time, status);
            bulk_update(&client, form).await
        }
    }
}

/// List all burn jobs
async fn list_jobs(client: &EcoBurnClient) -> Result<()> {
    let jobs = client.list_burn_jobs().await?;

    if jobs.is_empty() {
        println!("{}", "No burn jobs found.".yellow());
    } else {
        println!("{}", format!("Found {} burn job(s):", jobs.len()).bold());
        println!();
        for view in jobs {
            print_job_summary(&view.job);
        }
    }

    Ok(())
}

/// Get and display a single burn job
async fn get_job(client: &EcoBurnClient, id: &str) -> Result<()> {
    let uuid = resolve_burn_job_id(client, &IdOrPrefix::parse(id)).await?;
    let view = client.get_burn_job(uuid).await?;

    print_job_details(&view);

    Ok(())
}

async fn create_job(client: &EcoBurnClient, req: CreateBurnJob) -> Result<()> {
    let job = client.create_burn_job(req).await?;

    println!("{} Recorded burn job", "✓".green());
    println!();
    print_job_summary(&job);

    Ok(())
}

async fn set_status(client: &EcoBurnClient, id: &str, status: BurnStatus) -> Result<()> {
    let uuid = resolve_burn_job_id(client, &IdOrPrefix::parse(id)).await?;
    let job = client.set_status(uuid, status).await?;

    println!(
        "{} Burn job {} is now {}",
        "✓".green(),
        job.id.to_string().dimmed(),
        colorize_status(job.status)
    );

    Ok(())
}

async fn delete_job(client: &EcoBurnClient, id: &str) -> Result<()> {
    let uuid = resolve_burn_job_id(client, &IdOrPrefix::parse(id)).await?;
    client.delete_burn_job(uuid).await?;

    println!("{} Deleted burn job {}", "✓".green(), uuid.to_string().dimmed());

    Ok(())
}

/// Run a bulk transition and report the outcome
async fn bulk_update(client: &EcoBurnClient, form: BulkTransitionForm) -> Result<()> {
    let response = client.bulk_update(form).await?;

    if response.failed_ids.is_empty() {
        println!("{} {}", "✓".green(), response.message);
    } else {
        println!("{} {}", "⚠".yellow(), response.message);
        for id in &response.failed_ids {
            println!("    {} {}", "✗".red(), id.to_string().dimmed());
        }
    }

    Ok(())
}

/// Print a one-block burn job summary
fn print_job_summary(job: &BurnJob) {
    println!("  {} Burn job {}", "▸".cyan(), job.id.to_string().dimmed());
    println!("    Subject:  {}", job.subject_name);
    println!("    Weight:   {:.1} kg", job.weight_kg);
    println!("    Status:   {}", colorize_status(job.status));
    println!(
        "    Created:  {}",
        job.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print detailed burn job information with its progress stepper
fn print_job_details(view: &BurnJobView) {
    let job = &view.job;

    println!("{}", "Burn Job Details:".bold());
    println!("  ID:       {}", job.id.to_string().cyan());
    println!("  Subject:  {}", job.subject_name);
    println!("  Weight:   {:.1} kg", job.weight_kg);
    println!("  Kind:     {}", job.burn_kind);
    if let Some(kiln) = &job.kiln_name {
        println!("  Kiln:     {}", kiln);
    }
    if let Some(amount) = job.amount_paid {
        println!("  Paid:     {}", amount);
    }
    println!("  Status:   {}", colorize_status(job.status));
    println!("  Created:  {}", job.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Updated:  {}", job.updated_at.format("%Y-%m-%d %H:%M:%S"));

    println!(
        "\n{} {}",
        "Progress:".bold(),
        format!("{:.0}%", completed_fraction(&view.progress) * 100.0).dimmed()
    );
    println!("  {}", render_stepper(&view.progress));
    for stage in &view.progress {
        if let Some(at) = stage.timestamp {
            println!(
                "  {} {}",
                format!("{:<12}", stage.label.to_string()).green(),
                at.format("%Y-%m-%d %H:%M").to_string().dimmed()
            );
        }
    }
}

/// Render stages as a single-line text stepper
fn render_stepper(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(|stage| {
            let marker = if stage.completed { "●" } else { "○" };
            format!("{} {}", marker, stage.label)
        })
        .collect::<Vec<_>>()
        .join(" ── ")
}

/// Colorize burn status for display
fn colorize_status(status: BurnStatus) -> ColoredString {
    match status {
        BurnStatus::Pending => status.as_str().yellow(),
        BurnStatus::Processing => status.as_str().cyan(),
        BurnStatus::Completed => status.as_str().green(),
    }
}
