//! API client module
//!
//! HTTP client for the CATH FunFHMMer search service, plus the script-based
//! submission fallback.

pub mod client;
pub mod endpoints;
pub mod script;
pub mod types;

pub use client::ApiClient;
pub use types::*;
