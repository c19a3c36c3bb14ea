//! Script-based submission fallback
//!
//! Some deployments of the search service rejected direct form posts from
//! non-browser clients while accepting the ones made by Perl's LWP. This
//! module keeps that path available: it renders a small LWP script with the
//! sequence embedded, runs it with the configured interpreter, and parses the
//! JSON it prints. The native client in [`super::client`] is the default.

use crate::api::types::SubmitResponse;
use crate::error::{CliError, Result};
use funfam_common::{Sequence, TaskId};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// File name of the rendered script inside the work directory
pub const SCRIPT_FILE_NAME: &str = "cath_submission.pl";

const HEREDOC_MARKER: &str = "_PARAM";

/// Time the interpreter gets on top of the script's own network timeout
const INTERPRETER_GRACE: Duration = Duration::from_secs(5);

/// Render the LWP submission script for one sequence
pub fn render_script(submit_url: &str, sequence: &Sequence, timeout: Duration) -> Result<String> {
    if sequence
        .as_str()
        .lines()
        .any(|line| line.trim() == HEREDOC_MARKER)
    {
        return Err(CliError::script(format!(
            "sequence contains a line reading '{}', which would end the embedded heredoc",
            HEREDOC_MARKER
        )));
    }

    Ok(format!(
        r#"#!/usr/bin/perl
use strict;
use warnings;
use LWP::UserAgent;

my $ua = LWP::UserAgent->new;
$ua->timeout({timeout});
$ua->default_header( 'Accept' => 'application/json' );

my $url = '{url}';
my %data = ();
$data{{fasta}} = <<'{marker}';
{sequence}
{marker}

my $response = $ua->post( $url , \%data );

if ( $response->is_success ) {{
    print $response->decoded_content;
}}
else {{
    die $response->status_line;
}}
"#,
        timeout = timeout.as_secs().max(1),
        url = submit_url.replace('\'', "\\'"),
        marker = HEREDOC_MARKER,
        sequence = sequence.as_str(),
    ))
}

/// Write the script into `work_dir`, run it, and return the task id it prints
pub async fn submit_via_script(
    interpreter: &str,
    submit_url: &str,
    sequence: &Sequence,
    work_dir: &Path,
    timeout: Duration,
) -> Result<TaskId> {
    let script = render_script(submit_url, sequence, timeout)?;

    tokio::fs::create_dir_all(work_dir).await?;
    let script_path = work_dir.join(SCRIPT_FILE_NAME);
    tokio::fs::write(&script_path, script).await?;
    debug!(path = %script_path.display(), interpreter, "Wrote submission script");

    let limit = timeout.saturating_add(INTERPRETER_GRACE);
    let output = run_interpreter(interpreter, &script_path, limit).await;

    remove_script(&script_path).await;
    let output = output?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CliError::transport(
            submit_url,
            format!("submission script exited with {}: {}", output.status, stderr.trim()),
        ));
    }

    let response: SubmitResponse = serde_json::from_slice(&output.stdout).map_err(|e| {
        CliError::malformed(submit_url, format!("script output is not JSON: {}", e))
    })?;

    response.into_task_id(submit_url)
}

/// Run the script, killing the interpreter if it outlives `limit`
async fn run_interpreter(
    interpreter: &str,
    script_path: &Path,
    limit: Duration,
) -> Result<std::process::Output> {
    let child = Command::new(interpreter)
        .arg(script_path)
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(limit, child).await {
        Ok(output) => output
            .map_err(|e| CliError::script(format!("could not run '{}': {}", interpreter, e))),
        Err(_) => Err(CliError::script(format!(
            "'{}' did not finish within {:?}",
            interpreter, limit
        ))),
    }
}

async fn remove_script(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Could not remove submission script");
    }
}
