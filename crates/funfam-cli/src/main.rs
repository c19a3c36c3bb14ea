//! FunFam CLI - Main entry point

use clap::Parser;
use funfam_cli::{Cli, Commands};
use funfam_common::logging::{init_logging, LogConfig};
use funfam_common::TaskId;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Handle markdown help generation
    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Ensure a command is provided
    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Verbose flag picks the defaults; LOG_* variables may override them
    let log_config = match LogConfig::for_cli(cli.verbose).with_env_overrides() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring logging environment: {:#}", e);
            LogConfig::for_cli(cli.verbose)
        }
    };

    // CLI should work without logging
    let _log_guard = init_logging(&log_config).ok();

    // Execute command
    let result = execute_command(&cli).await;

    // Handle result
    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> funfam_cli::Result<()> {
    let Some(ref command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    let mut config = cli.config()?;

    match command {
        Commands::Scan {
            file,
            output_dir,
            poll,
            submit,
        } => {
            if let Some(dir) = output_dir {
                config.set_output_dir(dir);
            }
            poll.apply(&mut config)?;
            submit.apply(&mut config);
            funfam_cli::commands::scan::run(&config, file).await
        }

        Commands::Submit {
            file,
            output_dir,
            submit,
        } => {
            if let Some(dir) = output_dir {
                config.set_output_dir(dir);
            }
            submit.apply(&mut config);
            funfam_cli::commands::submit::run(&config, file).await
        }

        Commands::Check { task_id } => {
            let task_id: TaskId = task_id.parse()?;
            funfam_cli::commands::check::run(&config, &task_id).await
        }

        Commands::Results {
            task_id,
            format,
            save,
            output_dir,
        } => {
            if let Some(dir) = output_dir {
                config.set_output_dir(dir);
            }
            let task_id: TaskId = task_id.parse()?;
            funfam_cli::commands::results::run(&config, &task_id, *format, *save).await
        }
    }
}
