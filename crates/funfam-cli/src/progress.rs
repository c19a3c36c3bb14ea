//! Progress indicators for long-running operations

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Spinner text while a job is still running
pub fn pending_message(task_id: &str, attempts: u32) -> String {
    let noun = if attempts == 1 { "check" } else { "checks" };
    format!("Waiting for task {} ({} status {})", task_id, attempts, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_message() {
        assert_eq!(
            pending_message("abc123", 1),
            "Waiting for task abc123 (1 status check)"
        );
        assert_eq!(
            pending_message("abc123", 3),
            "Waiting for task abc123 (3 status checks)"
        );
    }

    #[test]
    fn test_create_spinner() {
        let pb = create_spinner("Submitting...");
        assert!(!pb.is_finished());
        pb.finish_and_clear();
        assert!(pb.is_finished());
    }
}
