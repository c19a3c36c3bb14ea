//! `funfam submit` command implementation
//!
//! Submits a sequence without waiting for it and prints the task id.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use funfam_common::Sequence;
use std::path::Path;

/// Submit one FASTA file; the task id goes to stdout on its own line
pub async fn run(config: &Config, fasta: &Path) -> Result<()> {
    let sequence = Sequence::from_file(fasta)?;

    let client = ApiClient::from_config(config)?;
    let task_id = client.submit_sequence(&sequence, &config.output_dir).await?;

    println!("{}", task_id);
    Ok(())
}
