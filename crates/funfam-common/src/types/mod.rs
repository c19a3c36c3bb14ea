//! Common types used across the FunFam client

use crate::error::{FunfamError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A protein sequence in FASTA form, exactly as supplied by the caller.
///
/// The text is submitted verbatim. Multi-record input is neither split nor
/// validated; the service decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence(String);

impl Sequence {
    /// Wrap raw FASTA text. Blank input is rejected.
    pub fn new(fasta: impl Into<String>) -> Result<Self> {
        let fasta = fasta.into();
        if fasta.trim().is_empty() {
            return Err(FunfamError::InvalidSequence(
                "sequence is empty".to_string(),
            ));
        }
        Ok(Self(fasta))
    }

    /// Read a FASTA file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        Self::new(contents).map_err(|_| {
            FunfamError::InvalidSequence(format!("'{}' contains no sequence", path.display()))
        })
    }

    /// The FASTA text with surrounding whitespace removed
    pub fn as_str(&self) -> &str {
        self.0.trim()
    }

    /// Number of `>` header lines in the input
    pub fn record_count(&self) -> usize {
        self.0
            .lines()
            .filter(|line| line.trim_start().starts_with('>'))
            .count()
    }

    /// Number of residue characters, ignoring headers and whitespace
    pub fn residue_count(&self) -> usize {
        self.0
            .lines()
            .filter(|line| !line.trim_start().starts_with('>'))
            .flat_map(|line| line.chars())
            .filter(|c| !c.is_whitespace())
            .count()
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque handle returned by the submission endpoint.
///
/// Only string identity matters; the value is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Create a task id. Blank ids are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(FunfamError::InvalidTaskId(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskId {
    type Error = FunfamError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::str::FromStr for TaskId {
    type Err = FunfamError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
