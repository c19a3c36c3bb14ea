//! `funfam check` command implementation

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use funfam_common::TaskId;

/// Print `ready` or `pending` for a task
pub async fn run(config: &Config, task_id: &TaskId) -> Result<()> {
    let client = ApiClient::from_config(config)?;

    let status = if client.check_status(task_id).await? {
        "ready"
    } else {
        "pending"
    };

    println!("{}", status);
    Ok(())
}
