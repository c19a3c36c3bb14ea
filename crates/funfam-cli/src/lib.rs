//! FunFam CLI Library
//!
//! Command-line client for the CATH FunFHMMer sequence search.
//!
//! # Overview
//!
//! - **Full scan**: submit, wait, and save both result tables (`funfam scan`)
//! - **Submission only**: queue a sequence and print its task id (`funfam submit`)
//! - **Status**: ask whether a task has finished (`funfam check`)
//! - **Results**: fetch the tables of a finished task (`funfam results`)
//!
//! The workflow itself lives in [`workflow`] and runs against the
//! [`workflow::FunfamService`] trait, implemented over HTTP by
//! [`api::ApiClient`].

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use workflow::{FunfamService, PollPolicy, Workflow};

use clap::{Args, Parser, Subcommand};
use output::OutputFormat;
use std::path::PathBuf;

/// FunFam - CATH functional family scans from the command line
#[derive(Parser, Debug)]
#[command(name = "funfam")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Search service root URL
    #[arg(long, env = "FUNFAM_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Print the CLI reference as Markdown and exit
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a sequence, wait for the job, and save both result tables
    Scan {
        /// FASTA file with a single protein sequence
        #[arg(short, long)]
        file: PathBuf,

        /// Directory for the result CSV files
        #[arg(short, long, env = "FUNFAM_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        poll: PollArgs,

        #[command(flatten)]
        submit: SubmitArgs,
    },

    /// Submit a sequence and print its task id without waiting
    Submit {
        /// FASTA file with a single protein sequence
        #[arg(short, long)]
        file: PathBuf,

        /// Directory for the submission script (script mode only)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        submit: SubmitArgs,
    },

    /// Check whether a task has finished
    Check {
        /// Task id printed by `funfam submit`
        task_id: String,
    },

    /// Fetch the results of a finished task
    Results {
        /// Task id printed by `funfam submit`
        task_id: String,

        /// Output format when printing
        #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Save funfam_scan.csv and funfam_resolved_scan.csv instead of printing
        #[arg(short, long)]
        save: bool,

        /// Directory for the result CSV files (with --save)
        #[arg(short, long, env = "FUNFAM_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },
}

/// Polling flags
#[derive(Args, Debug, Default)]
pub struct PollArgs {
    /// Seconds between status checks
    #[arg(long)]
    pub poll_interval_secs: Option<f64>,

    /// Give up after this many seconds (0 waits forever)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Submission flags
#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// Submit through a generated Perl LWP script instead of the HTTP client
    #[arg(long)]
    pub submit_via_script: bool,

    /// Interpreter that runs the submission script
    #[arg(long, default_value = config::DEFAULT_SCRIPT_INTERPRETER)]
    pub interpreter: String,
}

impl Cli {
    /// Environment configuration with global flags applied
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(ref url) = self.base_url {
            config.set_base_url(url.clone());
        }
        Ok(config)
    }
}

impl PollArgs {
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(secs) = self.poll_interval_secs {
            config.set_poll_interval_secs(secs)?;
        }
        if let Some(secs) = self.timeout_secs {
            config.set_poll_timeout_secs(secs);
        }
        Ok(())
    }
}

impl SubmitArgs {
    pub fn apply(&self, config: &mut Config) {
        if self.submit_via_script {
            config.use_script_submission(self.interpreter.clone());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from([
            "funfam",
            "-v",
            "scan",
            "-f",
            "query.fasta",
            "--timeout-secs",
            "30",
            "--submit-via-script",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command.unwrap() {
            Commands::Scan { file, poll, submit, .. } => {
                assert_eq!(file, PathBuf::from("query.fasta"));
                assert_eq!(poll.timeout_secs, Some(30));
                assert!(submit.submit_via_script);
                assert_eq!(submit.interpreter, "perl");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_results_format() {
        let cli = Cli::try_parse_from(["funfam", "results", "abc123", "-F", "json"]).unwrap();
        match cli.command.unwrap() {
            Commands::Results { task_id, format, save, .. } => {
                assert_eq!(task_id, "abc123");
                assert_eq!(format, OutputFormat::Json);
                assert!(!save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_poll_args_apply() {
        let mut config = Config::default();
        PollArgs {
            poll_interval_secs: Some(0.25),
            timeout_secs: Some(0),
        }
        .apply(&mut config)
        .unwrap();

        let policy = config.poll_policy();
        assert_eq!(policy.interval, std::time::Duration::from_millis(250));
        assert_eq!(policy.timeout, None);
    }
}
