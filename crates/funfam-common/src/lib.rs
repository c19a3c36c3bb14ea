//! FunFam Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the FunFam scan client.
//!
//! # Overview
//!
//! - **Error Handling**: Custom error types and result types
//! - **Types**: Input sequences and task identifiers
//! - **Tables**: Schema-free tabular view over service hit records
//! - **Logging**: Console/file tracing setup shared by binaries
//!
//! # Example
//!
//! ```no_run
//! use funfam_common::{Result, Sequence};
//!
//! fn load(path: &str) -> Result<()> {
//!     let sequence = Sequence::from_file(path)?;
//!     println!("{} residues", sequence.residue_count());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use error::{FunfamError, Result};
pub use table::HitTable;
pub use types::{Sequence, TaskId};
