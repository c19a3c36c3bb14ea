//! API endpoint URL builders
//!
//! Helper functions to construct FunFHMMer search URLs.

use funfam_common::TaskId;

const SEARCH_PATH: &str = "search/by_funfhmmer";

/// Build submission endpoint URL
pub fn submit_url(base_url: &str) -> String {
    format!("{}/{}", base_url, SEARCH_PATH)
}

/// Build job status URL
pub fn check_url(base_url: &str, task_id: &TaskId) -> String {
    format!(
        "{}/{}/check/{}",
        base_url,
        SEARCH_PATH,
        urlencoding::encode(task_id.as_str())
    )
}

/// Build results URL
pub fn results_url(base_url: &str, task_id: &TaskId) -> String {
    format!(
        "{}/{}/results/{}",
        base_url,
        SEARCH_PATH,
        urlencoding::encode(task_id.as_str())
    )
}
