//! HTTP API client for the FunFHMMer search service
//!
//! Submits sequences, checks job status, and downloads finished results.

use crate::api::{endpoints, script, types::*};
use crate::config::{Config, SubmitStrategy};
use crate::error::{CliError, Result};
use crate::workflow::FunfamService;
use async_trait::async_trait;
use funfam_common::{Sequence, TaskId};
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// API client for the search service
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    submit_strategy: SubmitStrategy,
}

impl ApiClient {
    /// Create a new API client using native submission
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("funfam/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout,
            submit_strategy: SubmitStrategy::Native,
        })
    }

    /// Create from CLI configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.base_url.clone(), config.request_timeout)?
            .with_submit_strategy(config.submit_strategy.clone()))
    }

    pub fn with_submit_strategy(mut self, strategy: SubmitStrategy) -> Self {
        self.submit_strategy = strategy;
        self
    }

    /// Submit a sequence and return its task id.
    ///
    /// `work_dir` receives the transient submission script when the script
    /// strategy is configured; native submission does not touch it.
    #[instrument(skip_all, fields(residues = sequence.residue_count()))]
    pub async fn submit_sequence(&self, sequence: &Sequence, work_dir: &Path) -> Result<TaskId> {
        let url = endpoints::submit_url(&self.base_url);

        let task_id = match &self.submit_strategy {
            SubmitStrategy::Native => {
                let response = self
                    .client
                    .post(&url)
                    .header(header::ACCEPT, "application/json")
                    .form(&SubmitRequest {
                        fasta: sequence.as_str(),
                    })
                    .send()
                    .await
                    .map_err(|e| CliError::transport(&url, e.to_string()))?;

                let body: SubmitResponse = read_json(&url, response).await?;
                body.into_task_id(&url)?
            }
            SubmitStrategy::Script { interpreter } => {
                script::submit_via_script(
                    interpreter,
                    &url,
                    sequence,
                    work_dir,
                    self.request_timeout,
                )
                .await?
            }
        };

        debug!(task_id = %task_id, "Sequence submitted");
        Ok(task_id)
    }

    /// Ask whether a job has finished. Not finished is `Ok(false)`.
    #[instrument(skip_all, fields(task_id = %task_id))]
    pub async fn check_status(&self, task_id: &TaskId) -> Result<bool> {
        let url = endpoints::check_url(&self.base_url, task_id);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CliError::transport(&url, e.to_string()))?;

        let body: StatusResponse = read_json(&url, response).await?;
        let ready = body.is_ready(&url)?;

        debug!(ready, message = ?body.message, "Status checked");
        Ok(ready)
    }

    /// Download and tabulate the results of a finished job
    #[instrument(skip_all, fields(task_id = %task_id))]
    pub async fn fetch_results(&self, task_id: &TaskId) -> Result<ScanResults> {
        let url = endpoints::results_url(&self.base_url, task_id);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CliError::transport(&url, e.to_string()))?;

        let body: ResultsResponse = read_json(&url, response).await?;
        let results = body.into_scan_results(&url)?;

        debug!(
            primary_hits = results.primary.len(),
            resolved_hits = results.resolved.len(),
            "Results fetched"
        );
        Ok(results)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Fail on a non-success status, then decode the body as JSON
async fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::transport(url, format!("server returned {}", status)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| CliError::transport(url, e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| CliError::malformed(url, e.to_string()))
}

#[async_trait]
impl FunfamService for ApiClient {
    async fn submit(&self, sequence: &Sequence, work_dir: &Path) -> Result<TaskId> {
        self.submit_sequence(sequence, work_dir).await
    }

    async fn is_ready(&self, task_id: &TaskId) -> Result<bool> {
        self.check_status(task_id).await
    }

    async fn results(&self, task_id: &TaskId) -> Result<ScanResults> {
        self.fetch_results(task_id).await
    }
}
