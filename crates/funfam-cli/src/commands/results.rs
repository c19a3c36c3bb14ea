//! `funfam results` command implementation
//!
//! Fetches the tables of a task that has already finished.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, OutputFormat};
use colored::Colorize;
use funfam_common::TaskId;

/// Print the results, or save them as CSV when `save` is set
pub async fn run(config: &Config, task_id: &TaskId, format: OutputFormat, save: bool) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let results = client.fetch_results(task_id).await?;

    if save {
        let (primary, resolved) = output::write_result_files(&results, &config.output_dir)?;
        println!("{} Saved {}", "✓".green(), primary.display().to_string().cyan());
        println!("{} Saved {}", "✓".green(), resolved.display().to_string().cyan());
    } else {
        print!("{}", output::render(&results, format)?);
    }

    Ok(())
}
