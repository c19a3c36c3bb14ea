//! `funfam scan` command implementation
//!
//! Runs the full workflow for one FASTA file and saves both result tables.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::progress;
use crate::workflow::Workflow;
use colored::Colorize;
use funfam_common::Sequence;
use std::path::Path;
use tracing::{info, warn};

/// Submit, wait, fetch, and write `funfam_scan.csv` / `funfam_resolved_scan.csv`
pub async fn run(config: &Config, fasta: &Path) -> Result<()> {
    let sequence = Sequence::from_file(fasta)?;
    if sequence.record_count() > 1 {
        warn!(
            records = sequence.record_count(),
            "Input holds more than one FASTA record; it is submitted as-is"
        );
    }
    info!(
        path = %fasta.display(),
        residues = sequence.residue_count(),
        base_url = %config.base_url,
        "Starting scan"
    );

    let client = ApiClient::from_config(config)?;

    let spinner = progress::create_spinner("Submitting sequence...");
    let spinner_for_polls = spinner.clone();
    let workflow = Workflow::new(client, config.poll_policy()).on_pending(move |task_id, attempts, _| {
        spinner_for_polls.set_message(progress::pending_message(task_id.as_str(), attempts));
    });

    let outcome = workflow
        .run_until(&sequence, &config.output_dir, super::ctrl_c())
        .await;
    spinner.finish_and_clear();
    let results = outcome?;

    let (primary, resolved) = output::write_result_files(&results, &config.output_dir)?;

    println!(
        "{} {} hit(s) -> {}",
        "✓".green(),
        results.primary.len(),
        primary.display().to_string().cyan()
    );
    println!(
        "{} {} resolved hit(s) -> {}",
        "✓".green(),
        results.resolved.len(),
        resolved.display().to_string().cyan()
    );

    Ok(())
}
