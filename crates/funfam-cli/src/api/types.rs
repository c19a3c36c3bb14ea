//! API request and response types
//!
//! Wire shapes of the FunFHMMer search service. Only the fields the client
//! needs are declared; anything else in a response is ignored. Hit records
//! are kept as raw JSON because their fields are defined by the service.

use crate::error::{CliError, Result};
use funfam_common::{HitTable, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection key of the full scan in the results body
pub const PRIMARY_SCAN_KEY: &str = "funfam_scan";

/// Collection key of the resolved scan in the results body
pub const RESOLVED_SCAN_KEY: &str = "funfam_resolved_scan";

/// Form body of a submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest<'a> {
    pub fasta: &'a str,
}

/// Response from the submission endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub task_id: Option<String>,
}

impl SubmitResponse {
    pub fn into_task_id(self, endpoint: &str) -> Result<TaskId> {
        let raw = self
            .task_id
            .ok_or_else(|| CliError::malformed(endpoint, "missing 'task_id'"))?;

        TaskId::new(raw).map_err(|_| CliError::malformed(endpoint, "'task_id' is empty"))
    }
}

/// `success` as sent by the status endpoint: a boolean or 0/1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SuccessFlag {
    Bool(bool),
    Int(i64),
}

impl SuccessFlag {
    pub fn is_set(self) -> bool {
        match self {
            SuccessFlag::Bool(b) => b,
            SuccessFlag::Int(n) => n != 0,
        }
    }
}

/// Response from the status endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub success: Option<SuccessFlag>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_ready(&self, endpoint: &str) -> Result<bool> {
        self.success
            .map(SuccessFlag::is_set)
            .ok_or_else(|| CliError::malformed(endpoint, "missing 'success'"))
    }
}

/// One named scan collection: `{"results": [{"hits": [...]}, ...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct ScanCollection {
    pub results: Option<Vec<ScanResult>>,
}

/// Per-query entry of a scan collection
#[derive(Debug, Clone, Deserialize)]
pub struct ScanResult {
    pub hits: Option<Vec<Value>>,
}

/// Response from the results endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsResponse {
    pub funfam_scan: Option<ScanCollection>,
    pub funfam_resolved_scan: Option<ScanCollection>,
}

impl ResultsResponse {
    /// Convert both collections to tables. A missing collection, result
    /// list, or hit list is malformed; an empty hit list is an empty table.
    pub fn into_scan_results(self, endpoint: &str) -> Result<ScanResults> {
        let primary = collection_table(self.funfam_scan, PRIMARY_SCAN_KEY, endpoint)?;
        let resolved = collection_table(self.funfam_resolved_scan, RESOLVED_SCAN_KEY, endpoint)?;

        Ok(ScanResults { primary, resolved })
    }
}

fn collection_table(
    collection: Option<ScanCollection>,
    key: &str,
    endpoint: &str,
) -> Result<HitTable> {
    let collection =
        collection.ok_or_else(|| CliError::malformed(endpoint, format!("missing '{}'", key)))?;

    let first = collection
        .results
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| CliError::malformed(endpoint, format!("'{}.results' is missing or empty", key)))?;

    let hits = first
        .hits
        .ok_or_else(|| CliError::malformed(endpoint, format!("missing '{}.results[0].hits'", key)))?;

    HitTable::from_records(&hits)
        .map_err(|e| CliError::malformed(endpoint, format!("{}: {}", key, e)))
}

/// The two result sets of a finished job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResults {
    /// Every hit found by the scan
    pub primary: HitTable,
    /// Resolved, non-overlapping subset of the hits
    pub resolved: HitTable,
}
