//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod check;
pub mod results;
pub mod scan;
pub mod submit;

use tracing::warn;

/// Resolves when the user presses Ctrl-C. Never resolves if the signal
/// handler cannot be installed.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C; polling can only stop at the deadline");
        std::future::pending::<()>().await;
    }
}
